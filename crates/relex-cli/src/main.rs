//! Relex CLI - relation extraction over link-grammar linkages

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, extract, rules};
use config::Config;
use output::OutputFormat;
use relex_rules::RuleTable;

#[derive(Parser)]
#[command(name = "relex")]
#[command(author, version, about = "Semantic relation extraction from link-grammar parses")]
pub struct Cli {
    /// Rule table to use instead of the configured or bundled one
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract relations from JSON linkages
    Extract(extract::ExtractArgs),
    /// Inspect rule tables
    Rules(rules::RulesArgs),
    /// Manage CLI configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded configuration
pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            config: Config::load(),
        }
    }

    /// Rule table path: `--rules`, then the config file; `None` means bundled
    pub fn rules_path(&self, cli: &Cli) -> Option<PathBuf> {
        cli.rules.clone().or_else(|| self.config.rules.clone())
    }

    pub fn format(&self, cli: &Cli) -> OutputFormat {
        cli.format.or(self.config.format).unwrap_or_default()
    }

    pub fn load_table(&self, path: Option<&Path>) -> anyhow::Result<Arc<RuleTable>> {
        let table = match path {
            Some(path) => {
                tracing::debug!("Loading rule table from {:?}", path);
                RuleTable::load(path)
                    .with_context(|| format!("Failed to load rule table {}", path.display()))?
            }
            None => RuleTable::builtin().context("Bundled rule table is invalid")?,
        };
        tracing::info!(
            name = table.name(),
            version = table.version(),
            rules = table.len(),
            "Rule table loaded"
        );
        Ok(Arc::new(table))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting relex CLI");

    let ctx = AppContext::new();

    match &cli.command {
        Commands::Extract(args) => extract::run(args, &cli, &ctx).await?,
        Commands::Rules(args) => rules::run(args, &cli, &ctx)?,
        Commands::Config(args) => commands::config::run(args).await?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
