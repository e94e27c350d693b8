//! Output formatting utilities

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use relex_engine::Extraction;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One relation per line, a blank line between sentences
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Format extractions based on format type
pub fn format_extractions(extractions: &[Extraction], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extractions)?),
        OutputFormat::Text => {
            let blocks: Vec<String> = extractions
                .iter()
                .map(|extraction| {
                    let mut lines = Vec::new();
                    if !extraction.sentence.is_empty() {
                        lines.push(format!("# {}", extraction.sentence));
                    }
                    lines.extend(extraction.lines());
                    lines.join("\n")
                })
                .collect();
            Ok(blocks.join("\n\n"))
        }
    }
}
