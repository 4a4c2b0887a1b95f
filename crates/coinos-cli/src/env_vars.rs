//! Coinos environment variables

use std::env;

use crate::config::Coinos;

pub const ENV_COINOS_BASE_URL: &str = "COINOS_BASE_URL";
pub const ENV_COINOS_USERNAME: &str = "COINOS_USERNAME";
pub const ENV_COINOS_PASSWORD: &str = "COINOS_PASSWORD";
pub const ENV_COINOS_TIMEOUT_SECS: &str = "COINOS_TIMEOUT_SECS";

impl Coinos {
    pub fn from_env(mut self) -> Self {
        if let Ok(base_url) = env::var(ENV_COINOS_BASE_URL) {
            self.base_url = base_url;
        }

        if let Ok(username) = env::var(ENV_COINOS_USERNAME) {
            self.username = Some(username);
        }

        if let Ok(password) = env::var(ENV_COINOS_PASSWORD) {
            self.password = Some(password);
        }

        if let Ok(timeout_str) = env::var(ENV_COINOS_TIMEOUT_SECS) {
            if let Ok(timeout) = timeout_str.parse() {
                self.timeout_secs = Some(timeout);
            }
        }

        self
    }
}
