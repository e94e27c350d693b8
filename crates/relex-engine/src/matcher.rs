//! Rule Engine: matches rule table patterns against a linkage

use std::collections::BTreeSet;
use std::sync::Arc;

use relex_core::{LinkId, LinkageGraph, Relation, RelationSet, RelationType, WordId};
use relex_rules::{Action, Pattern, RelationTemplate, Rule, RuleTable, ValueTemplate, VarId};

use crate::traits::Stage;

/// Record of one rule firing on one binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFiring {
    pub rule: String,
    pub slot: String,
    /// Links claimed under `slot` by this firing
    pub claimed: BTreeSet<LinkId>,
    pub emitted: Vec<Relation>,
}

/// Variable assignment for one match, indexed by [`VarId`]
type Binding = Vec<Option<WordId>>;

/// Generic pattern matcher over the shared rule table
pub struct RuleEngine {
    table: Arc<RuleTable>,
}

impl RuleEngine {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Fire every rule in priority order and return the firings
    ///
    /// A binding is dropped when one of the links it would claim is already
    /// claimed in the same slot, either by a higher-priority rule or by an
    /// earlier binding of the same rule.
    pub fn fire(&self, graph: &LinkageGraph) -> Vec<RuleFiring> {
        let mut ledger: BTreeSet<(&str, LinkId)> = BTreeSet::new();
        let mut firings = Vec::new();

        for rule in self.table.rules() {
            for (binding, links) in matches(graph, &rule.pattern) {
                let claimed: BTreeSet<LinkId> = rule
                    .pattern
                    .links
                    .iter()
                    .zip(&links)
                    .filter(|(clause, _)| clause.claim)
                    .map(|(_, id)| *id)
                    .collect();

                if let Some(taken) = claimed
                    .iter()
                    .find(|id| ledger.contains(&(rule.slot.as_str(), **id)))
                {
                    tracing::trace!(
                        rule = %rule.name,
                        slot = %rule.slot,
                        link = %taken,
                        "Link already claimed, skipping binding"
                    );
                    continue;
                }
                for id in &claimed {
                    ledger.insert((rule.slot.as_str(), *id));
                }

                let emitted = build_relations(graph, rule, &binding);
                tracing::trace!(rule = %rule.name, emitted = emitted.len(), "Rule fired");
                firings.push(RuleFiring {
                    rule: rule.name.clone(),
                    slot: rule.slot.clone(),
                    claimed,
                    emitted,
                });
            }
        }

        tracing::debug!(firings = firings.len(), "Rule engine finished");
        firings
    }
}

impl Stage for RuleEngine {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn run(&self, graph: &LinkageGraph, _found: &RelationSet) -> Vec<Relation> {
        self.fire(graph)
            .into_iter()
            .flat_map(|firing| firing.emitted)
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Matching
// ─────────────────────────────────────────────────────────────────────────────

/// All complete bindings of a pattern, with the link used by each link clause
fn matches(graph: &LinkageGraph, pattern: &Pattern) -> Vec<(Binding, Vec<LinkId>)> {
    let mut out = Vec::new();
    let mut binding: Binding = vec![None; pattern.vars.len()];
    let mut links = Vec::with_capacity(pattern.links.len());
    join_links(graph, pattern, 0, &mut binding, &mut links, &mut out);
    out
}

fn join_links(
    graph: &LinkageGraph,
    pattern: &Pattern,
    clause: usize,
    binding: &mut Binding,
    links: &mut Vec<LinkId>,
    out: &mut Vec<(Binding, Vec<LinkId>)>,
) {
    let Some(link_clause) = pattern.links.get(clause) else {
        bind_free(graph, pattern, 0, binding, links, out);
        return;
    };

    for link in graph.links_of_type(link_clause.link_type) {
        if links.contains(&link.id) {
            continue;
        }
        let saved = binding.clone();
        if assign(graph, pattern, binding, link_clause.head, link.head())
            && assign(graph, pattern, binding, link_clause.dependent, link.dependent())
        {
            links.push(link.id);
            join_links(graph, pattern, clause + 1, binding, links, out);
            links.pop();
        }
        *binding = saved;
    }
}

/// Bind variables that only appear in word clauses, ranging over all words
fn bind_free(
    graph: &LinkageGraph,
    pattern: &Pattern,
    var: usize,
    binding: &mut Binding,
    links: &[LinkId],
    out: &mut Vec<(Binding, Vec<LinkId>)>,
) {
    if var == binding.len() {
        if order_ok(pattern, binding) && absent_ok(graph, pattern, binding) {
            out.push((binding.clone(), links.to_vec()));
        }
        return;
    }
    if binding[var].is_some() {
        bind_free(graph, pattern, var + 1, binding, links, out);
        return;
    }
    for word in graph.words() {
        if assign(graph, pattern, binding, VarId(var), word.id) {
            bind_free(graph, pattern, var + 1, binding, links, out);
            binding[var] = None;
        }
    }
}

/// Bind `var` to `word` if consistent: same word when already bound,
/// otherwise a word no other variable holds that passes the variable's guards
fn assign(
    graph: &LinkageGraph,
    pattern: &Pattern,
    binding: &mut Binding,
    var: VarId,
    word: WordId,
) -> bool {
    match binding[var.0] {
        Some(bound) => bound == word,
        None => {
            if binding.iter().any(|b| *b == Some(word)) {
                return false;
            }
            let Some(w) = graph.word(word) else {
                return false;
            };
            if !pattern
                .words
                .iter()
                .filter(|clause| clause.var == var)
                .all(|clause| clause.guard.accepts(w))
            {
                return false;
            }
            binding[var.0] = Some(word);
            true
        }
    }
}

fn order_ok(pattern: &Pattern, binding: &Binding) -> bool {
    pattern
        .order
        .iter()
        .all(|(first, second)| match (binding[first.0], binding[second.0]) {
            (Some(a), Some(b)) => a < b,
            _ => true,
        })
}

fn absent_ok(graph: &LinkageGraph, pattern: &Pattern, binding: &Binding) -> bool {
    pattern.absent.iter().all(|clause| {
        let Some(word) = binding[clause.var.0] else {
            return true;
        };
        !graph.links_at(word).any(|link| {
            if link.link_type != clause.link_type {
                return false;
            }
            if clause.end.is_some_and(|end| link.end(end) != word) {
                return false;
            }
            if clause.partner_pos.is_empty() {
                return true;
            }
            link.other(word)
                .and_then(|other| graph.word(other))
                .is_some_and(|other| clause.partner_pos.contains(&other.pos))
        })
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

fn build_relations(graph: &LinkageGraph, rule: &Rule, binding: &Binding) -> Vec<Relation> {
    let word = |var: VarId| binding.get(var.0).copied().flatten();
    let lemma = |var: VarId| {
        word(var)
            .and_then(|id| graph.word(id))
            .map(|w| w.name().to_lowercase())
    };

    rule.actions
        .iter()
        .filter_map(|action| match action {
            Action::Binary {
                relation,
                governor,
                dependent,
            } => {
                let kind = match relation {
                    RelationTemplate::Fixed(kind) => kind.clone(),
                    RelationTemplate::PrepNamedBy(var) => RelationType::prep(lemma(*var)?),
                    RelationTemplate::ConjNamedBy(var) => RelationType::conj(lemma(*var)?),
                };
                Some(Relation::binary(kind, word(*governor)?, word(*dependent)?))
            }
            Action::Unary {
                feature,
                word: target,
                value,
            } => {
                let value = match value {
                    ValueTemplate::Literal(value) => value.clone(),
                    ValueTemplate::LemmaOf(var) => lemma(*var)?,
                };
                Some(Relation::unary(*feature, word(*target)?, value))
            }
        })
        .collect()
}
