//! Rule table error types

use thiserror::Error;

/// Result type alias for rule table operations
pub type RuleResult<T> = std::result::Result<T, RuleTableError>;

/// Errors raised while loading a rule table
///
/// All of these are fatal: a process must not start extracting with a table
/// that failed to load.
#[derive(Error, Debug)]
pub enum RuleTableError {
    #[error("Rule table parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rule table version {found} is newer than supported version {max}")]
    UnsupportedVersion { found: u32, max: u32 },

    #[error("Duplicate rule: {0}")]
    DuplicateRule(String),

    #[error("Rule '{rule}': {source}")]
    UnknownTag {
        rule: String,
        #[source]
        source: relex_core::Error,
    },

    #[error("Rule '{rule}': variable '{var}' is not bound by any link or word clause")]
    UnboundVariable { rule: String, var: String },

    #[error("Rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Rule table has no rules")]
    Empty,
}

impl RuleTableError {
    pub fn invalid(rule: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown_tag(rule: &str, source: relex_core::Error) -> Self {
        Self::UnknownTag {
            rule: rule.to_string(),
            source,
        }
    }
}
