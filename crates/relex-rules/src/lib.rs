//! Relex Rules - Declarative rule tables
//!
//! Rule tables are TOML documents mapping link-grammar patterns onto
//! semantic relations. They are validated into closed enumerations when
//! loaded, so an unknown tag is reported once at startup rather than
//! silently failing to match at runtime.

pub mod error;
pub mod table;
pub mod version;

pub use error::{RuleResult, RuleTableError};
pub use table::{
    AbsentClause, Action, ConjunctionPolicy, LinkClause, Pattern, RelationTemplate, Rule,
    RuleTable, ValueTemplate, VarId, WordClause, WordGuard, BUILTIN_TABLE,
};
pub use version::CURRENT_VERSION;
