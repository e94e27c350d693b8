//! Relation vocabulary, relation sets and the textual relation form

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::linkage::LinkageGraph;
use crate::word::WordId;

/// Binary relation types
///
/// Closed apart from two lexically named families: prepositional relations
/// named by the preposition and `conj_<lemma>` coordination relations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationType {
    Subj,
    Obj,
    Iobj,
    Predadj,
    Psubj,
    Pobj,
    Amod,
    Advmod,
    Nn,
    Poss,
    Det,
    NumQuantity,
    QuantityMod,
    ToDo,
    Comparative,
    Than,
    Than1,
    Than2,
    Who,
    Which,
    Whose,
    ThatAdj,
    /// Prepositional relation, named by the preposition lemma
    Prep(String),
    /// Coordination relation, named by the conjunction lemma
    Conj(String),
}

const FIXED_RELATIONS: [(RelationType, &str); 22] = [
    (RelationType::Subj, "_subj"),
    (RelationType::Obj, "_obj"),
    (RelationType::Iobj, "_iobj"),
    (RelationType::Predadj, "_predadj"),
    (RelationType::Psubj, "_psubj"),
    (RelationType::Pobj, "_pobj"),
    (RelationType::Amod, "_amod"),
    (RelationType::Advmod, "_advmod"),
    (RelationType::Nn, "_nn"),
    (RelationType::Poss, "_poss"),
    (RelationType::Det, "_det"),
    (RelationType::NumQuantity, "_num_quantity"),
    (RelationType::QuantityMod, "_quantity_mod"),
    (RelationType::ToDo, "_to-do"),
    (RelationType::Comparative, "_comparative"),
    (RelationType::Than, "than"),
    (RelationType::Than1, "than1"),
    (RelationType::Than2, "than2"),
    (RelationType::Who, "who"),
    (RelationType::Which, "which"),
    (RelationType::Whose, "whose"),
    (RelationType::ThatAdj, "that_adj"),
];

const CONJ_PREFIX: &str = "conj_";

impl RelationType {
    pub fn prep(lemma: impl Into<String>) -> Self {
        Self::Prep(lemma.into().to_lowercase())
    }

    pub fn conj(lemma: impl Into<String>) -> Self {
        Self::Conj(lemma.into().to_lowercase())
    }

    /// Parse a relation name from configuration
    ///
    /// Only fixed names and `conj_<lemma>` are accepted; prepositional
    /// relations are never spelled out in a rule table.
    pub fn from_name(name: &str) -> Result<Self> {
        if let Some((kind, _)) = FIXED_RELATIONS.iter().find(|(_, n)| *n == name) {
            return Ok(kind.clone());
        }
        match name.strip_prefix(CONJ_PREFIX) {
            Some(lemma) if !lemma.is_empty() => Ok(Self::conj(lemma)),
            _ => Err(Error::unknown_tag("relation", name)),
        }
    }

    pub fn is_conj(&self) -> bool {
        matches!(self, Self::Conj(_))
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for RelationType {
    type Err = Error;

    /// Lenient parse used for textual relations: any other plain lower-case
    /// word is read as a preposition.
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(kind) = Self::from_name(s) {
            return Ok(kind);
        }
        let plain = !s.is_empty()
            && !s.starts_with('_')
            && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if plain {
            Ok(Self::prep(s))
        } else {
            Err(Error::unknown_tag("relation", s))
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prep(lemma) => f.write_str(lemma),
            Self::Conj(lemma) => write!(f, "{}{}", CONJ_PREFIX, lemma),
            fixed => {
                let name = FIXED_RELATIONS
                    .iter()
                    .find(|(kind, _)| kind == fixed)
                    .map(|(_, name)| *name)
                    .unwrap_or("?");
                f.write_str(name)
            }
        }
    }
}

/// Unary feature annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureKind {
    Quantity,
    Degree,
    Tense,
    NounNumber,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 4] = [
        Self::Quantity,
        Self::Degree,
        Self::Tense,
        Self::NounNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quantity => "_quantity",
            Self::Degree => "degree",
            Self::Tense => "tense",
            Self::NounNumber => "noun_number",
        }
    }
}

impl FromStr for FeatureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::unknown_tag("feature relation", s))
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Relations
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BinaryRelation {
    pub kind: RelationType,
    pub governor: WordId,
    pub dependent: WordId,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnaryRelation {
    pub feature: FeatureKind,
    pub word: WordId,
    pub value: String,
}

/// A semantic relation over words of one linkage
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Binary(BinaryRelation),
    Unary(UnaryRelation),
}

impl Relation {
    pub fn binary(kind: RelationType, governor: WordId, dependent: WordId) -> Self {
        Self::Binary(BinaryRelation {
            kind,
            governor,
            dependent,
        })
    }

    pub fn unary(feature: FeatureKind, word: WordId, value: impl Into<String>) -> Self {
        Self::Unary(UnaryRelation {
            feature,
            word,
            value: value.into(),
        })
    }

    /// Words this relation refers to
    pub fn words(&self) -> Vec<WordId> {
        match self {
            Self::Binary(b) => vec![b.governor, b.dependent],
            Self::Unary(u) => vec![u.word],
        }
    }

    /// Textual form, e.g. `_subj(like, people)` or `tense(like, present)`
    pub fn render(&self, graph: &LinkageGraph) -> String {
        match self {
            Self::Binary(b) => RelationTuple::from_binary(b, graph).to_string(),
            Self::Unary(u) => FeatureTuple::from_unary(u, graph).to_string(),
        }
    }
}

/// Deduplicated, ordered collection of relations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    binary: BTreeSet<BinaryRelation>,
    unary: BTreeSet<UnaryRelation>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a relation; returns false when the exact tuple was present
    pub fn insert(&mut self, relation: Relation) -> bool {
        match relation {
            Relation::Binary(b) => self.binary.insert(b),
            Relation::Unary(u) => self.unary.insert(u),
        }
    }

    pub fn contains(&self, relation: &Relation) -> bool {
        match relation {
            Relation::Binary(b) => self.binary.contains(b),
            Relation::Unary(u) => self.unary.contains(u),
        }
    }

    pub fn len(&self) -> usize {
        self.binary.len() + self.unary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binary.is_empty() && self.unary.is_empty()
    }

    pub fn binary(&self) -> impl Iterator<Item = &BinaryRelation> + '_ {
        self.binary.iter()
    }

    pub fn unary(&self) -> impl Iterator<Item = &UnaryRelation> + '_ {
        self.unary.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = Relation> + '_ {
        self.binary
            .iter()
            .cloned()
            .map(Relation::Binary)
            .chain(self.unary.iter().cloned().map(Relation::Unary))
    }

    pub fn of_kind<'a>(
        &'a self,
        kind: &'a RelationType,
    ) -> impl Iterator<Item = &'a BinaryRelation> + 'a {
        self.binary.iter().filter(move |b| &b.kind == kind)
    }

    /// Dependents of `governor` under `kind`
    pub fn dependents<'a>(
        &'a self,
        kind: &'a RelationType,
        governor: WordId,
    ) -> impl Iterator<Item = WordId> + 'a {
        self.of_kind(kind)
            .filter(move |b| b.governor == governor)
            .map(|b| b.dependent)
    }

    /// Governors of `dependent` under `kind`
    pub fn governors<'a>(
        &'a self,
        kind: &'a RelationType,
        dependent: WordId,
    ) -> impl Iterator<Item = WordId> + 'a {
        self.of_kind(kind)
            .filter(move |b| b.dependent == dependent)
            .map(|b| b.governor)
    }

    pub fn has_unary(&self, feature: FeatureKind, word: WordId) -> bool {
        self.unary
            .iter()
            .any(|u| u.feature == feature && u.word == word)
    }
}

impl Extend<Relation> for RelationSet {
    fn extend<I: IntoIterator<Item = Relation>>(&mut self, iter: I) {
        for relation in iter {
            self.insert(relation);
        }
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Textual form
// ─────────────────────────────────────────────────────────────────────────────

/// A binary relation by name: `type(governor, dependent)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationTuple {
    pub relation: String,
    pub governor: String,
    pub dependent: String,
}

impl RelationTuple {
    pub fn new(
        relation: impl Into<String>,
        governor: impl Into<String>,
        dependent: impl Into<String>,
    ) -> Self {
        Self {
            relation: relation.into(),
            governor: governor.into(),
            dependent: dependent.into(),
        }
    }

    pub fn from_binary(relation: &BinaryRelation, graph: &LinkageGraph) -> Self {
        Self::new(
            relation.kind.name(),
            graph.name(relation.governor),
            graph.name(relation.dependent),
        )
    }

    /// Parse `type(governor, dependent)`; whitespace after the comma is optional
    pub fn parse(line: &str) -> Result<Self> {
        let (relation, governor, dependent) = split_form(line)?;
        relation.parse::<RelationType>()?;
        Ok(Self::new(relation, governor, dependent))
    }
}

impl std::fmt::Display for RelationTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.relation, self.governor, self.dependent)
    }
}

/// A unary relation by name: `feature(word, value)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeatureTuple {
    pub feature: String,
    pub word: String,
    pub value: String,
}

impl FeatureTuple {
    pub fn new(
        feature: impl Into<String>,
        word: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            feature: feature.into(),
            word: word.into(),
            value: value.into(),
        }
    }

    pub fn from_unary(relation: &UnaryRelation, graph: &LinkageGraph) -> Self {
        Self::new(
            relation.feature.as_str(),
            graph.name(relation.word),
            relation.value.as_str(),
        )
    }

    pub fn parse(line: &str) -> Result<Self> {
        let (feature, word, value) = split_form(line)?;
        feature.parse::<FeatureKind>()?;
        Ok(Self::new(feature, word, value))
    }
}

impl std::fmt::Display for FeatureTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.feature, self.word, self.value)
    }
}

fn split_form(line: &str) -> Result<(&str, &str, &str)> {
    let invalid = || Error::RelationSyntax(line.to_string());
    let line = line.trim();
    let open = line.find('(').ok_or_else(invalid)?;
    let inner = line
        .get(open + 1..)
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let (first, second) = inner.split_once(',').ok_or_else(invalid)?;
    let (name, first, second) = (line[..open].trim(), first.trim(), second.trim());
    if name.is_empty() || first.is_empty() || second.is_empty() {
        return Err(invalid());
    }
    Ok((name, first, second))
}
