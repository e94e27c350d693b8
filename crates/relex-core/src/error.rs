//! Error types for Relex Core

use thiserror::Error;

use crate::limits::ValidationError;

/// Result type alias using Relex's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Relex error types
///
/// `MalformedLinkage` and `AmbiguousAntecedent` describe a single
/// construction that could not be resolved; the stages that produce them
/// log and continue with the rest of the sentence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid linkage: {0}")]
    InvalidLinkage(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown {kind} tag: {tag}")]
    UnknownTag { kind: &'static str, tag: String },

    #[error("Malformed linkage at '{word}': {reason}")]
    MalformedLinkage { word: String, reason: String },

    #[error("No antecedent for relativizer '{0}'")]
    AmbiguousAntecedent(String),

    #[error("Invalid relation text: {0}")]
    RelationSyntax(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(word: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLinkage {
            word: word.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_tag(kind: &'static str, tag: impl Into<String>) -> Self {
        Self::UnknownTag {
            kind,
            tag: tag.into(),
        }
    }
}
