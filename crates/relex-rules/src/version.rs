//! Rule table format versions
//!
//! Tables declare the format version they were written for. Older versions
//! are read as-is; newer ones are refused.

use crate::error::{RuleResult, RuleTableError};

/// Current rule table format version
pub const CURRENT_VERSION: u32 = 1;

/// Rule table format version information
#[derive(Debug, Clone)]
pub struct FormatVersion {
    pub version: u32,
    pub description: &'static str,
}

/// All known format versions
pub fn known_versions() -> Vec<FormatVersion> {
    vec![FormatVersion {
        version: 1,
        description: "Link clauses, word guards, absent constraints, claim slots",
    }]
}

/// Check that a table version can be read by this build
pub fn ensure_supported(version: u32) -> RuleResult<()> {
    if version == 0 {
        return Err(RuleTableError::invalid("<table>", "version must be at least 1"));
    }
    if version > CURRENT_VERSION {
        return Err(RuleTableError::UnsupportedVersion {
            found: version,
            max: CURRENT_VERSION,
        });
    }
    if version < CURRENT_VERSION {
        tracing::debug!(
            "Reading rule table version {} with format version {}",
            version,
            CURRENT_VERSION
        );
    }
    Ok(())
}
