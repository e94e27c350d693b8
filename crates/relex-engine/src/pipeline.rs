//! Extraction pipeline

use std::sync::Arc;

use relex_core::LinkageGraph;
use relex_rules::{RuleResult, RuleTable};

use crate::assembler::{Assembler, Extraction};
use crate::comparative::ComparativeResolver;
use crate::conjunction::ConjunctionDistributor;
use crate::matcher::RuleEngine;
use crate::relative::RelativeResolver;
use crate::traits::Stage;

/// Per-sentence extraction over a shared rule table
///
/// Holds no per-sentence state, so one pipeline can serve many sentences
/// concurrently behind an `Arc`.
pub struct Pipeline {
    table: Arc<RuleTable>,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Rule Engine, Conjunction Distribution, Comparative Resolver,
    /// Relative Clause Resolver, in that order
    pub fn new(table: Arc<RuleTable>) -> Self {
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(RuleEngine::new(Arc::clone(&table))),
            Box::new(ConjunctionDistributor::from_table(&table)),
            Box::new(ComparativeResolver::new()),
            Box::new(RelativeResolver::new()),
        ];
        Self { table, stages }
    }

    /// Pipeline over the bundled default table
    pub fn builtin() -> RuleResult<Self> {
        Ok(Self::new(Arc::new(RuleTable::builtin()?)))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Extract all relations for one linkage
    pub fn extract(&self, graph: &LinkageGraph) -> Extraction {
        let mut assembler = Assembler::new(graph);
        for stage in &self.stages {
            let batch = stage.run(graph, assembler.relations());
            let emitted = batch.len();
            let added = assembler.add(batch);
            tracing::debug!(stage = stage.name(), emitted, added, "Stage finished");
        }
        let extraction = assembler.finish();
        tracing::debug!(
            sentence = %graph.sentence(),
            binary = extraction.binary().len(),
            unary = extraction.unary().len(),
            "Extracted relations"
        );
        extraction
    }
}
