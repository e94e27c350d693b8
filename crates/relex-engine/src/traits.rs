//! Pipeline stage trait

use relex_core::{LinkageGraph, Relation, RelationSet};

/// One step of the extraction pipeline
///
/// A stage reads the immutable graph plus everything found by earlier
/// stages and returns the relations it adds. Per-construction failures are
/// handled inside the stage; a stage never aborts the sentence.
pub trait Stage: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Relations derived from `graph` given what is already `found`
    fn run(&self, graph: &LinkageGraph, found: &RelationSet) -> Vec<Relation>;
}
