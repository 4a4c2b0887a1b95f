use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use coinos::{Credentials, SessionClient, DEFAULT_BASE_URL};
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

const DEFAULT_WORK_DIR: &str = ".coinos-cli";

#[derive(Clone, Serialize, Deserialize)]
pub struct Coinos {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Request timeout, the client default when unset
    pub timeout_secs: Option<u64>,
}

impl Default for Coinos {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: None,
            password: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for Coinos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coinos")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Coinos {
    /// Build a [`SessionClient`] from these settings
    pub fn session_client(&self) -> Result<SessionClient> {
        let username = self
            .username
            .clone()
            .ok_or(anyhow!("Coinos username must be set"))?;
        let password = self
            .password
            .clone()
            .ok_or(anyhow!("Coinos password must be set"))?;

        let mut builder =
            SessionClient::builder(Credentials::new(username, password)).base_url(&self.base_url);

        match self.timeout_secs {
            Some(0) => return Err(anyhow!("Coinos timeout_secs must be greater than zero")),
            Some(secs) => builder = builder.timeout(Duration::from_secs(secs)),
            None => (),
        }

        Ok(builder.build()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub coinos: Coinos,
}

impl Settings {
    /// Load settings from defaults, overridden by the config file
    ///
    /// Without an explicit path `~/.coinos-cli/config.toml` is read if present.
    pub fn new(config_file_name: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default = Settings::default();

        let (config_file, required) = match config_file_name {
            Some(path) => (path, true),
            None => (
                home::home_dir()
                    .ok_or(ConfigError::NotFound("Config Path".to_string()))?
                    .join(DEFAULT_WORK_DIR)
                    .join("config.toml"),
                false,
            ),
        };

        let config: Config = Config::builder()
            // use defaults
            .add_source(Config::try_from(&default)?)
            // override with file contents
            .add_source(File::from(config_file).required(required))
            .build()?;

        config.try_deserialize()
    }
}
