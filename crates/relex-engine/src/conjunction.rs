//! Conjunction Distribution: copies relations across coordinated words

use std::collections::BTreeMap;

use relex_core::{LinkageGraph, PartOfSpeech, Relation, RelationSet, WordId};
use relex_rules::{ConjunctionPolicy, RuleTable};

use crate::traits::Stage;

/// Upper bound on distribution passes for one sentence
pub const DEFAULT_MAX_PASSES: usize = 16;

/// Result of distributing over one relation set
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    /// Relations added, not including the input
    pub added: RelationSet,
    /// Passes run, including the final pass that added nothing
    pub passes: usize,
}

/// Role a coordinated word plays in a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Governor,
    Dependent,
}

/// Coordinated groups: connected components over `conj_*` relations
struct Groups {
    edges: Vec<(WordId, WordId)>,
    span: BTreeMap<WordId, (WordId, WordId)>,
}

impl Groups {
    fn from_relations(found: &RelationSet) -> Self {
        let edges: Vec<(WordId, WordId)> = found
            .binary()
            .filter(|b| b.kind.is_conj())
            .map(|b| (b.governor, b.dependent))
            .collect();

        // Union-find over the coordinated words
        let mut parent: BTreeMap<WordId, WordId> = BTreeMap::new();
        fn root(parent: &mut BTreeMap<WordId, WordId>, w: WordId) -> WordId {
            let p = *parent.entry(w).or_insert(w);
            if p == w {
                return w;
            }
            let r = root(parent, p);
            parent.insert(w, r);
            r
        }
        for &(a, b) in &edges {
            let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
            if ra != rb {
                parent.insert(ra.max(rb), ra.min(rb));
            }
        }

        let members: Vec<WordId> = parent.keys().copied().collect();
        let mut extent: BTreeMap<WordId, (WordId, WordId)> = BTreeMap::new();
        for &w in &members {
            let r = root(&mut parent, w);
            let e = extent.entry(r).or_insert((w, w));
            e.0 = e.0.min(w);
            e.1 = e.1.max(w);
        }
        let span = members
            .iter()
            .map(|&w| {
                let r = root(&mut parent, w);
                (w, extent[&r])
            })
            .collect();

        Self { edges, span }
    }

    fn inside(&self, member: WordId, word: WordId) -> bool {
        self.span
            .get(&member)
            .is_some_and(|&(lo, hi)| lo <= word && word <= hi)
    }

    fn before(&self, member: WordId, word: WordId) -> bool {
        self.span.get(&member).is_some_and(|&(lo, _)| word < lo)
    }
}

/// Propagates distributable relations between coordinated siblings
pub struct ConjunctionDistributor {
    policy: ConjunctionPolicy,
    max_passes: usize,
}

impl ConjunctionDistributor {
    pub fn new(policy: ConjunctionPolicy) -> Self {
        Self {
            policy,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn from_table(table: &RuleTable) -> Self {
        Self::new(table.conjunction().clone())
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Distribute to a fixpoint
    ///
    /// For each coordination pair (A, B), in both directions, a relation in
    /// which A plays a role is copied with B in that role when the other
    /// participant lies outside the coordinated span and B does not already
    /// play that role for the relation type.
    ///
    /// A coordinated verb only shares what it governs to the left of the
    /// span, such as its subject. Objects and modifiers to its right belong
    /// to that conjunct alone.
    pub fn distribute(&self, graph: &LinkageGraph, found: &RelationSet) -> Distribution {
        let groups = Groups::from_relations(found);
        let mut result = Distribution::default();
        if groups.edges.is_empty() {
            return result;
        }

        let mut working = found.clone();
        while result.passes < self.max_passes {
            result.passes += 1;
            let snapshot = working.clone();
            let mut added = 0;

            for &(a, b) in &groups.edges {
                for (from, to) in [(a, b), (b, a)] {
                    for relation in snapshot.binary() {
                        if !self.policy.is_distributable(&relation.kind) {
                            continue;
                        }
                        let (role, partner) = if relation.governor == from {
                            (Role::Governor, relation.dependent)
                        } else if relation.dependent == from {
                            (Role::Dependent, relation.governor)
                        } else {
                            continue;
                        };
                        if groups.inside(from, partner) {
                            continue;
                        }
                        if role == Role::Governor
                            && is_verb(graph, from)
                            && !groups.before(from, partner)
                        {
                            continue;
                        }

                        let (copy, occupied) = match role {
                            Role::Governor => (
                                Relation::binary(relation.kind.clone(), to, partner),
                                working.dependents(&relation.kind, to).next().is_some(),
                            ),
                            Role::Dependent => (
                                Relation::binary(relation.kind.clone(), partner, to),
                                working.governors(&relation.kind, to).next().is_some(),
                            ),
                        };
                        if occupied {
                            continue;
                        }
                        working.insert(copy.clone());
                        result.added.insert(copy);
                        added += 1;
                    }
                }
            }

            tracing::trace!(pass = result.passes, added, "Distribution pass");
            if added == 0 {
                return result;
            }
        }

        tracing::debug!(
            passes = result.passes,
            "Conjunction distribution stopped at pass cap"
        );
        result
    }
}

impl Stage for ConjunctionDistributor {
    fn name(&self) -> &'static str {
        "conjunction"
    }

    fn run(&self, graph: &LinkageGraph, found: &RelationSet) -> Vec<Relation> {
        let distribution = self.distribute(graph, found);
        tracing::debug!(
            added = distribution.added.len(),
            passes = distribution.passes,
            "Conjunction distribution finished"
        );
        distribution.added.iter().collect()
    }
}

fn is_verb(graph: &LinkageGraph, word: WordId) -> bool {
    graph.word(word).is_some_and(|w| w.pos == PartOfSpeech::Verb)
}
