use std::path::PathBuf;

mod account;
mod command;
mod config;
mod git;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = GitIdent::parse();
    let config_dir = args.config_dir.map_or_else(default_config_dir, Ok)?;

    let mut config = config::AccountConfig::read_or_create(config_dir.join("accounts.json"))?;
    return match args.subcommand {
        Commands::Add { kind } => command::add(kind, &mut config).await,
        Commands::Switch { kind } => command::switch(kind, &mut config).await,
        Commands::Remove { kind } => command::remove(kind, &mut config).await,
        Commands::List => command::list(&config).await,
        Commands::Status => command::status(&config).await,
        Commands::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&schemars::schema_for!(config::AccountsFile))?
            );
            Ok(())
        }
    };
}

fn default_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("No config directory on this platform, provide one using --config-dir")?
        .join("git-ident"))
}

#[derive(Parser)]
struct GitIdent {
    #[clap(subcommand)]
    pub subcommand: Commands,
    /// Directory holding the account file, defaults to the platform config dir
    #[clap(long, short)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new account or update an existing one, then switch to it
    Add { kind: Option<String> },
    /// Switch the active account, prompting when no type is given
    Switch { kind: Option<String> },
    /// Remove an account
    Remove { kind: Option<String> },
    /// List all accounts
    List,
    /// Show the active account
    Status,
    /// Print the JSON schema of the account file
    Schema,
}
