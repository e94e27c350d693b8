//! Extract command

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::output::format_extractions;
use crate::{AppContext, Cli};
use relex_core::{LinkageGraph, LinkageInput};
use relex_engine::Pipeline;

#[derive(Args)]
pub struct ExtractArgs {
    /// JSON files holding one linkage or an array of them ('-' reads stdin)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

pub async fn run(args: &ExtractArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let table = ctx.load_table(ctx.rules_path(cli).as_deref())?;

    let mut graphs = Vec::new();
    for input in &args.inputs {
        graphs.extend(read_linkages(input)?);
    }
    tracing::info!("Extracting relations from {} linkages", graphs.len());

    let pipeline = Arc::new(Pipeline::new(table));
    let tasks: Vec<_> = graphs
        .into_iter()
        .map(|graph| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || pipeline.extract(&graph))
        })
        .collect();

    let mut extractions = Vec::with_capacity(tasks.len());
    for task in tasks {
        extractions.push(task.await?);
    }

    let empty = extractions.iter().filter(|e| e.is_empty()).count();
    if empty > 0 {
        tracing::info!("{} linkages produced no relations", empty);
    }

    println!("{}", format_extractions(&extractions, ctx.format(cli))?);
    Ok(())
}

fn read_linkages(input: &Path) -> anyhow::Result<Vec<LinkageGraph>> {
    let label = input.display().to_string();
    let content = if label == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        content
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", label))?
    };
    parse_linkages(&content, &label)
}

/// Parse one linkage object or an array of them, validating each graph
pub fn parse_linkages(content: &str, label: &str) -> anyhow::Result<Vec<LinkageGraph>> {
    let inputs =
        LinkageInput::from_json(content).with_context(|| format!("{}: malformed linkage JSON", label))?;

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            LinkageGraph::try_from(input)
                .with_context(|| format!("{}: linkage {} is invalid", label, i))
        })
        .collect()
}
