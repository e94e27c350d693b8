//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name (rules, format)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name (rules, format)
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Write an empty config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => run_get(key),
        ConfigCommands::Set { key, value } => run_set(key, value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Init { force } => run_init(*force),
    }
}

fn run_get(key: &str) -> anyhow::Result<()> {
    if !Config::keys().contains(&key) {
        anyhow::bail!(
            "Unknown config key: {} (available: {})",
            key,
            Config::keys().join(", ")
        );
    }
    let value = Config::load().get(key);
    println!("{}", value.as_deref().unwrap_or("(not set)"));
    Ok(())
}

fn run_set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load();
    config.set(key, value)?;
    config.save()?;
    println!("Set {} = {}", key, value);
    Ok(())
}

fn run_list() -> anyhow::Result<()> {
    let config = Config::load();
    println!("Config file: {}", config_file_path().display());
    for key in Config::keys() {
        let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
        println!("{} = {}", key, value);
    }
    Ok(())
}

fn run_init(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    Config::default().save()?;
    println!("Created config file at {}", path.display());
    Ok(())
}
