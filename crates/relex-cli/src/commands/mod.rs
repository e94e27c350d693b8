//! CLI command implementations

pub mod completions;
pub mod config;
pub mod extract;
pub mod rules;
