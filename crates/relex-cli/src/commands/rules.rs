//! Rule table commands

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::{AppContext, Cli};
use relex_rules::{Action, RelationTemplate};

#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommands,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Validate a rule table
    Check {
        /// Rule table file (defaults to --rules, the config, then the bundled table)
        path: Option<PathBuf>,
    },
    /// List rules in firing order
    List {
        /// Rule table file (defaults to --rules, the config, then the bundled table)
        path: Option<PathBuf>,
    },
}

pub fn run(args: &RulesArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let (path, list) = match &args.command {
        RulesCommands::Check { path } => (path, false),
        RulesCommands::List { path } => (path, true),
    };
    let path = path.clone().or_else(|| ctx.rules_path(cli));
    let table = ctx.load_table(path.as_deref())?;
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(bundled)".to_string());

    if !list {
        println!(
            "OK {}: table '{}' version {}, {} rules",
            source,
            table.name(),
            table.version(),
            table.len()
        );
        return Ok(());
    }

    println!("Rules in '{}' ({} found):", table.name(), table.len());
    for rule in table.rules() {
        let relations: Vec<String> = rule.actions.iter().map(describe).collect();
        println!(
            "  {:>4}  {} [{}] -> {}",
            rule.priority,
            rule.name,
            rule.slot,
            relations.join(", ")
        );
    }
    Ok(())
}

fn describe(action: &Action) -> String {
    match action {
        Action::Binary { relation, .. } => match relation {
            RelationTemplate::Fixed(kind) => kind.name(),
            RelationTemplate::PrepNamedBy(_) => "<prep>".to_string(),
            RelationTemplate::ConjNamedBy(_) => "conj_<lemma>".to_string(),
        },
        Action::Unary { feature, .. } => feature.to_string(),
    }
}
