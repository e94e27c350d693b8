//! Relation Set Assembler

use serde::Serialize;

use relex_core::{FeatureTuple, LinkageGraph, Relation, RelationSet, RelationTuple};

/// Accumulates stage output for one sentence
pub struct Assembler<'g> {
    graph: &'g LinkageGraph,
    relations: RelationSet,
    dropped: usize,
}

impl<'g> Assembler<'g> {
    pub fn new(graph: &'g LinkageGraph) -> Self {
        Self {
            graph,
            relations: RelationSet::new(),
            dropped: 0,
        }
    }

    /// Merge a batch; returns how many relations were new
    ///
    /// Relations naming a word outside the graph are dropped.
    pub fn add(&mut self, batch: impl IntoIterator<Item = Relation>) -> usize {
        let mut added = 0;
        for relation in batch {
            if let Some(missing) = relation.words().into_iter().find(|w| !self.graph.contains(*w)) {
                tracing::warn!(word = %missing, ?relation, "Dropping relation outside linkage");
                self.dropped += 1;
                continue;
            }
            if self.relations.insert(relation) {
                added += 1;
            }
        }
        added
    }

    /// Everything merged so far
    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> Extraction {
        let mut binary: Vec<RelationTuple> = self
            .relations
            .binary()
            .map(|b| RelationTuple::from_binary(b, self.graph))
            .collect();
        let mut unary: Vec<FeatureTuple> = self
            .relations
            .unary()
            .map(|u| FeatureTuple::from_unary(u, self.graph))
            .collect();
        binary.sort();
        unary.sort();

        Extraction {
            sentence: self.graph.sentence().to_string(),
            binary,
            unary,
            relations: self.relations,
        }
    }
}

/// Final relations for one sentence
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub sentence: String,
    binary: Vec<RelationTuple>,
    unary: Vec<FeatureTuple>,
    #[serde(skip)]
    relations: RelationSet,
}

impl Extraction {
    pub fn binary(&self) -> &[RelationTuple] {
        &self.binary
    }

    pub fn unary(&self) -> &[FeatureTuple] {
        &self.unary
    }

    /// Word-level relations, before naming
    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    pub fn is_empty(&self) -> bool {
        self.binary.is_empty() && self.unary.is_empty()
    }

    /// Textual form: binary relations, then unary ones, one per line
    pub fn lines(&self) -> Vec<String> {
        self.binary
            .iter()
            .map(ToString::to_string)
            .chain(self.unary.iter().map(ToString::to_string))
            .collect()
    }
}
