//! Comparative Resolver
//!
//! Comparatives are discontinuous: a degree trigger ("more", "less",
//! "fewer", or an inflected form like "faster") somewhere in the clause, and
//! a correlative "than" attached elsewhere. Each trigger is driven through a
//! small state machine:
//!
//! ```text
//! SCAN -> TRIGGER_FOUND -> LOCATE_THAN -> BIND_ARGUMENTS -> EMIT -> DONE
//! ```
//!
//! Any step may fail with [`Error::MalformedLinkage`], which abandons that
//! trigger only. Triggers read the stage input and never each other's
//! output, so their order does not matter.

use relex_core::{
    Error, Feature, FeatureKind, LinkType, LinkageGraph, PartOfSpeech, Relation, RelationSet,
    RelationType, Result, WordId,
};

use crate::traits::Stage;

/// Direction of comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    More,
    Less,
}

impl Polarity {
    fn of_lemma(lemma: &str) -> Option<Self> {
        match lemma.to_ascii_lowercase().as_str() {
            "more" => Some(Self::More),
            "less" | "fewer" => Some(Self::Less),
            _ => None,
        }
    }
}

/// How the trigger attaches to its head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Morphological comparative, e.g. "faster"
    Inflected,
    /// Degree word on an adjective or adverb ("more intelligent")
    Adjectival,
    /// Degree word determining a noun, optionally with a numeral ("10 more miles")
    Quantity { numeral: Option<WordId> },
    /// Degree word modifying a verb directly ("like pigs less")
    Verbal,
}

/// A detected degree trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerKind,
    /// The compared word: adjective, adverb, noun or verb
    pub head: WordId,
    /// The lexical degree word, absent for inflected triggers
    pub degree: Option<WordId>,
    pub polarity: Polarity,
}

/// Complement of "than"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complement {
    /// "than dogs"
    Phrasal(WordId),
    /// "than John does", "than Ben wins contests"
    Clausal { verb: WordId },
}

/// Where the "than" of a trigger was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThanSite {
    pub than: WordId,
    /// Word carrying the `MVt` link
    pub attach: WordId,
    pub complement: Complement,
}

/// Arguments bound for emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub trigger: Trigger,
    pub site: ThanSite,
    pub governor: Option<WordId>,
    pub matrix_verb: Option<WordId>,
    pub left: WordId,
    pub right: WordId,
}

/// State of the per-trigger machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    TriggerFound(Trigger),
    LocateThan(Trigger),
    BindArguments(Trigger, ThanSite),
    Emit(Bound),
    Done(Vec<Relation>),
}

/// Detects and resolves comparative constructions
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparativeResolver;

impl ComparativeResolver {
    pub fn new() -> Self {
        Self
    }

    /// SCAN: every degree trigger in the linkage, in word order
    pub fn scan(&self, graph: &LinkageGraph) -> Vec<Trigger> {
        let mut triggers = Vec::new();
        let mut push = |trigger: Trigger| {
            if !triggers.contains(&trigger) {
                triggers.push(trigger);
            }
        };

        for word in graph.words() {
            let Some(polarity) = Polarity::of_lemma(word.name()) else {
                if word.has_feature(Feature::Comparative) {
                    push(Trigger {
                        kind: TriggerKind::Inflected,
                        head: word.id,
                        degree: None,
                        polarity: Polarity::More,
                    });
                }
                continue;
            };
            let degree = Some(word.id);
            let count_only = word.is_lemma("fewer");

            if !count_only {
                let heads = graph
                    .heads_of(word.id, LinkType::AdjectiveDegree)
                    .chain(graph.heads_of(word.id, LinkType::AdverbDegree));
                for head in heads {
                    push(Trigger {
                        kind: TriggerKind::Adjectival,
                        head,
                        degree,
                        polarity,
                    });
                }
            }

            for noun in graph.heads_of(word.id, LinkType::Determiner) {
                let numeral = graph
                    .dependents_of(noun, LinkType::Determiner)
                    .chain(
                        graph
                            .links_at(word.id)
                            .filter(|l| l.link_type == LinkType::NumberModifier)
                            .filter_map(|l| l.other(word.id)),
                    )
                    .find(|&w| w != word.id && is_numeral(graph, w));
                push(Trigger {
                    kind: TriggerKind::Quantity { numeral },
                    head: noun,
                    degree,
                    polarity,
                });
            }

            for number in graph.heads_of(word.id, LinkType::NumberModifier) {
                if let Some(noun) = graph.heads_of(number, LinkType::Determiner).next() {
                    push(Trigger {
                        kind: TriggerKind::Quantity {
                            numeral: Some(number),
                        },
                        head: noun,
                        degree,
                        polarity,
                    });
                }
            }

            if !count_only {
                for verb in graph.heads_of(word.id, LinkType::VerbModifier) {
                    push(Trigger {
                        kind: TriggerKind::Verbal,
                        head: verb,
                        degree,
                        polarity,
                    });
                }
            }
        }

        triggers
    }

    /// Drive one trigger to completion
    pub fn resolve(
        &self,
        graph: &LinkageGraph,
        found: &RelationSet,
        trigger: Trigger,
    ) -> Result<Vec<Relation>> {
        let mut phase = Phase::TriggerFound(trigger);
        loop {
            phase = match self.step(graph, found, phase)? {
                Phase::Done(relations) => return Ok(relations),
                next => next,
            };
        }
    }

    /// Advance the machine by one transition
    pub fn step(&self, graph: &LinkageGraph, found: &RelationSet, phase: Phase) -> Result<Phase> {
        match phase {
            Phase::TriggerFound(trigger) => {
                if !graph.contains(trigger.head) {
                    return Err(Error::malformed(
                        trigger.head.to_string(),
                        "trigger head outside linkage",
                    ));
                }
                tracing::trace!(head = graph.name(trigger.head), kind = ?trigger.kind, "Comparative trigger");
                Ok(Phase::LocateThan(trigger))
            }
            Phase::LocateThan(trigger) => {
                let site = locate_than(graph, found, &trigger)?;
                Ok(Phase::BindArguments(trigger, site))
            }
            Phase::BindArguments(trigger, site) => {
                Ok(Phase::Emit(bind_arguments(graph, found, trigger, site)?))
            }
            Phase::Emit(bound) => Ok(Phase::Done(emit(graph, found, &bound))),
            done @ Phase::Done(_) => Ok(done),
        }
    }
}

impl Stage for ComparativeResolver {
    fn name(&self) -> &'static str {
        "comparative"
    }

    fn run(&self, graph: &LinkageGraph, found: &RelationSet) -> Vec<Relation> {
        let mut out = Vec::new();
        for trigger in self.scan(graph) {
            match self.resolve(graph, found, trigger) {
                Ok(relations) => out.extend(relations),
                Err(e) => {
                    tracing::debug!(error = %e, "Comparative trigger abandoned");
                }
            }
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────────────────────────

fn locate_than(graph: &LinkageGraph, found: &RelationSet, trigger: &Trigger) -> Result<ThanSite> {
    let head = trigger.head;
    let mut candidates = vec![head];
    if let Some(copula) = graph.heads_of(head, LinkType::PredAdjective).next() {
        candidates.push(copula);
    }
    if matches!(trigger.kind, TriggerKind::Quantity { .. }) {
        candidates.extend(object_governor(graph, found, head));
    }

    let (attach, than) = candidates
        .iter()
        .find_map(|&c| {
            graph
                .dependents_of(c, LinkType::ThanAttach)
                .next()
                .map(|than| (c, than))
        })
        .ok_or_else(|| Error::malformed(graph.name(head), "no than attached to the clause"))?;

    let complement = if let Some(x) = graph.dependents_of(than, LinkType::ThanObject).next() {
        Complement::Phrasal(x)
    } else if let Some(verb) = graph.dependents_of(than, LinkType::ThanClause).next() {
        Complement::Clausal { verb }
    } else {
        return Err(Error::malformed(graph.name(than), "than has no complement"));
    };

    Ok(ThanSite {
        than,
        attach,
        complement,
    })
}

fn bind_arguments(
    graph: &LinkageGraph,
    found: &RelationSet,
    trigger: Trigger,
    site: ThanSite,
) -> Result<Bound> {
    let head = trigger.head;
    let predicative = found.governors(&RelationType::Predadj, head).next();
    let advmod_governor = found.governors(&RelationType::Advmod, head).next();
    let amod_governor = found.governors(&RelationType::Amod, head).next();
    let verb_of_object = object_governor(graph, found, head);

    let (governor, matrix_verb) = match trigger.kind {
        TriggerKind::Verbal => (None, Some(head)),
        TriggerKind::Quantity { .. } => (verb_of_object, verb_of_object),
        TriggerKind::Inflected | TriggerKind::Adjectival => {
            let matrix = if predicative.is_some() {
                graph.heads_of(head, LinkType::PredAdjective).next()
            } else if advmod_governor.is_some() {
                advmod_governor
            } else {
                amod_governor.and_then(|noun| object_governor(graph, found, noun))
            };
            let governor = predicative
                .or(advmod_governor)
                .or(amod_governor)
                .or(verb_of_object);
            (governor, matrix)
        }
    };

    if trigger.kind != TriggerKind::Verbal && governor.is_none() {
        return Err(Error::malformed(graph.name(head), "comparative head has no governor"));
    }

    let left = match trigger.kind {
        TriggerKind::Verbal => first_object(graph, found, head).or_else(|| subject_of(graph, found, head)),
        _ => predicative
            .or_else(|| matrix_verb.and_then(|v| subject_of(graph, found, v)))
            .or(amod_governor),
    }
    .ok_or_else(|| Error::malformed(graph.name(head), "no left argument"))?;

    let right = match site.complement {
        Complement::Phrasal(x) => Some(x),
        Complement::Clausal { verb } => subject_of(graph, found, verb),
    }
    .ok_or_else(|| Error::malformed(graph.name(site.than), "than clause has no subject"))?;

    Ok(Bound {
        trigger,
        site,
        governor,
        matrix_verb,
        left,
        right,
    })
}

fn emit(graph: &LinkageGraph, found: &RelationSet, bound: &Bound) -> Vec<Relation> {
    let trigger = &bound.trigger;
    let head = trigger.head;
    let mut out = vec![Relation::binary(RelationType::Than, bound.left, bound.right)];

    if trigger.kind != TriggerKind::Verbal {
        if let Some(governor) = bound.governor {
            out.push(Relation::binary(RelationType::Comparative, head, governor));
        }
        let bearer = match trigger.kind {
            TriggerKind::Quantity { .. } => trigger.degree.unwrap_or(head),
            _ => head,
        };
        out.push(Relation::unary(FeatureKind::Degree, bearer, "comparative"));
    }

    match (trigger.kind, trigger.degree) {
        (TriggerKind::Quantity { numeral: Some(n) }, Some(degree)) => {
            out.push(Relation::binary(RelationType::NumQuantity, head, n));
            out.push(Relation::binary(RelationType::QuantityMod, n, degree));
        }
        (TriggerKind::Quantity { numeral: None }, Some(degree)) => {
            out.push(Relation::unary(
                FeatureKind::Quantity,
                head,
                graph.name(degree).to_lowercase(),
            ));
        }
        (kind, Some(degree)) => {
            let plain_advmod =
                trigger.polarity == Polarity::Less || kind == TriggerKind::Verbal;
            if plain_advmod {
                out.push(Relation::binary(RelationType::Advmod, head, degree));
            }
        }
        (_, None) => {}
    }

    if let (Complement::Clausal { verb }, Some(matrix)) = (bound.site.complement, bound.matrix_verb) {
        if matrix != verb && !is_placeholder(graph, verb) {
            out.push(Relation::binary(RelationType::Than1, matrix, verb));
            if let (Some(a), Some(b)) = (
                first_object(graph, found, matrix),
                first_object(graph, found, verb),
            ) {
                out.push(Relation::binary(RelationType::Than2, a, b));
            }
        }
    }

    tracing::trace!(head = graph.name(head), emitted = out.len(), "Comparative resolved");
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookups
// ─────────────────────────────────────────────────────────────────────────────

fn is_numeral(graph: &LinkageGraph, word: WordId) -> bool {
    graph
        .word(word)
        .is_some_and(|w| w.pos == PartOfSpeech::Number)
}

/// Auxiliaries standing in for an elided predicate
fn is_placeholder(graph: &LinkageGraph, verb: WordId) -> bool {
    graph.word(verb).is_some_and(|w| {
        w.has_feature(Feature::Auxiliary) || ["be", "do", "have"].iter().any(|l| w.is_lemma(l))
    })
}

/// Verb of which `noun` is the object
fn object_governor(graph: &LinkageGraph, found: &RelationSet, noun: WordId) -> Option<WordId> {
    found
        .governors(&RelationType::Obj, noun)
        .next()
        .or_else(|| graph.heads_of(noun, LinkType::Object).next())
}

fn subject_of(graph: &LinkageGraph, found: &RelationSet, verb: WordId) -> Option<WordId> {
    found
        .dependents(&RelationType::Subj, verb)
        .next()
        .or_else(|| graph.dependents_of(verb, LinkType::Subject).next())
}

fn first_object(graph: &LinkageGraph, found: &RelationSet, verb: WordId) -> Option<WordId> {
    found
        .dependents(&RelationType::Obj, verb)
        .next()
        .or_else(|| graph.dependents_of(verb, LinkType::Object).next())
}
