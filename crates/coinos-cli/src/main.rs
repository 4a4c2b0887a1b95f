//! Coinos command line client

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

mod config;
mod env_vars;
mod sub_commands;

/// Command line client for the Coinos payments API
#[derive(Parser)]
#[command(name = "coinos-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Logging level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
    /// Coinos API base url
    #[arg(long)]
    base_url: Option<String>,
    /// Coinos username
    #[arg(short, long)]
    username: Option<String>,
    /// Coinos password
    #[arg(short, long)]
    password: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show account details
    Account,
    /// Create an invoice
    Invoice(sub_commands::invoice::InvoiceSubCommand),
    /// Show account details and create a 1000 sat test invoice
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let default_filter = args.log_level;

    let http_filter = "hyper=warn,reqwest=warn";

    let env_filter = EnvFilter::new(format!("{},{}", default_filter, http_filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings::new(args.config.clone())?;

    let mut coinos = settings.coinos.from_env();
    if let Some(base_url) = args.base_url {
        coinos.base_url = base_url;
    }
    if let Some(username) = args.username {
        coinos.username = Some(username);
    }
    if let Some(password) = args.password {
        coinos.password = Some(password);
    }
    tracing::debug!("Using settings: {:?}", coinos);

    let mut client = coinos.session_client()?;
    client.login().await.context("Login failed")?;

    match &args.command {
        Commands::Account => sub_commands::account::account(&client).await,
        Commands::Invoice(sub_command_args) => {
            sub_commands::invoice::invoice(&client, sub_command_args).await
        }
        Commands::Demo => sub_commands::demo::demo(&client).await,
    }
}
