//! Relex Engine - relation extraction over link-grammar linkages
//!
//! A [`Pipeline`] runs four stages over one [`relex_core::LinkageGraph`]:
//!
//! - [`RuleEngine`]: pattern rules from the rule table
//! - [`ConjunctionDistributor`]: copies relations across coordinated words
//! - [`ComparativeResolver`]: "more/less/-er ... than" constructions
//! - [`RelativeResolver`]: relative pronouns and their antecedents
//!
//! The [`Assembler`] merges stage output into a deduplicated [`Extraction`].

pub mod assembler;
pub mod comparative;
pub mod conjunction;
pub mod matcher;
pub mod pipeline;
pub mod relative;
pub mod traits;

#[cfg(test)]
mod fixtures;

pub use assembler::{Assembler, Extraction};
pub use comparative::{ComparativeResolver, Phase, Polarity, Trigger, TriggerKind};
pub use conjunction::{ConjunctionDistributor, Distribution, DEFAULT_MAX_PASSES};
pub use matcher::{RuleEngine, RuleFiring};
pub use pipeline::Pipeline;
pub use relative::{RelativeResolver, Relativizer};
pub use traits::Stage;
