//! Relative Clause Resolver: binds relativizers to their antecedents

use relex_core::{
    Error, LinkType, LinkageGraph, Relation, RelationSet, RelationType, Result, Word, WordId,
};

use crate::traits::Stage;

/// Links followed from an auxiliary to the lexical predicate
const PREDICATE_CHAIN: [LinkType; 4] = [
    LinkType::PredAdjective,
    LinkType::Passive,
    LinkType::Progressive,
    LinkType::Infinitive,
];

/// Relative pronoun kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relativizer {
    Who,
    Which,
    Whose,
    That,
}

impl Relativizer {
    fn of_word(word: &Word) -> Option<Self> {
        match word.name().to_ascii_lowercase().as_str() {
            "who" => Some(Self::Who),
            "which" => Some(Self::Which),
            "whose" => Some(Self::Whose),
            "that" => Some(Self::That),
            _ => None,
        }
    }

    pub fn relation(&self) -> RelationType {
        match self {
            Self::Who => RelationType::Who,
            Self::Which => RelationType::Which,
            Self::Whose => RelationType::Whose,
            Self::That => RelationType::ThatAdj,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeResolver;

impl RelativeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Relativizers in word order
    ///
    /// Only words attached as a relative pronoun count; demonstrative and
    /// complementizer "that" carry neither an `R` nor an `RS` link.
    pub fn relativizers(&self, graph: &LinkageGraph) -> Vec<(WordId, Relativizer)> {
        graph
            .words()
            .iter()
            .filter(|w| is_relative_pronoun(graph, w.id))
            .filter_map(|w| Relativizer::of_word(w).map(|kind| (w.id, kind)))
            .collect()
    }

    /// Nearest valid antecedent for the relativizer at `rel`
    pub fn antecedent(&self, graph: &LinkageGraph, rel: WordId) -> Result<WordId> {
        if let Some(head) = graph.heads_of(rel, LinkType::Relative).find(|&h| h < rel) {
            return Ok(head);
        }

        graph
            .words()
            .iter()
            .rev()
            .filter(|w| w.id < rel && w.pos.is_nominal())
            .filter(|w| !is_relative_pronoun(graph, w.id))
            .find(|w| {
                !graph
                    .dependents_of(w.id, LinkType::Relative)
                    .any(|other| other != rel)
            })
            .map(|w| w.id)
            .ok_or_else(|| Error::AmbiguousAntecedent(graph.name(rel).to_string()))
    }

    /// Resolve one relativizer into its linking relation
    pub fn resolve(
        &self,
        graph: &LinkageGraph,
        rel: WordId,
        kind: Relativizer,
    ) -> Result<Relation> {
        let antecedent = self.antecedent(graph, rel)?;

        let target = match kind {
            Relativizer::Whose => graph
                .heads_of(rel, LinkType::Determiner)
                .next()
                .ok_or_else(|| Error::malformed(graph.name(rel), "whose determines no noun"))?,
            _ => predicate(graph, rel, antecedent)
                .ok_or_else(|| Error::malformed(graph.name(rel), "no embedded predicate"))?,
        };

        Ok(Relation::binary(kind.relation(), antecedent, target))
    }
}

impl Stage for RelativeResolver {
    fn name(&self) -> &'static str {
        "relative"
    }

    fn run(&self, graph: &LinkageGraph, _found: &RelationSet) -> Vec<Relation> {
        let mut out = Vec::new();
        for (rel, kind) in self.relativizers(graph) {
            match self.resolve(graph, rel, kind) {
                Ok(relation) => out.push(relation),
                Err(e) => tracing::debug!(error = %e, "Relativizer left unresolved"),
            }
        }
        out
    }
}

fn is_relative_pronoun(graph: &LinkageGraph, word: WordId) -> bool {
    graph.heads_of(word, LinkType::Relative).next().is_some()
        || graph.heads_of(word, LinkType::RelativeSubject).next().is_some()
}

/// Predicate of the embedded clause
///
/// Subject relatives follow `RS` and then any auxiliary chain; object
/// relatives use the `B` link from the antecedent to a verb after the
/// relativizer.
fn predicate(graph: &LinkageGraph, rel: WordId, antecedent: WordId) -> Option<WordId> {
    if let Some(mut verb) = graph.heads_of(rel, LinkType::RelativeSubject).next() {
        for _ in 0..PREDICATE_CHAIN.len() {
            let next = PREDICATE_CHAIN
                .iter()
                .find_map(|&t| graph.dependents_of(verb, t).next());
            match next {
                Some(next) => verb = next,
                None => break,
            }
        }
        return Some(verb);
    }

    graph
        .heads_of(antecedent, LinkType::Extracted)
        .find(|&verb| verb > rel)
}
