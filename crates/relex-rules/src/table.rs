//! Rule table: declarative patterns and actions, validated at load time

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use relex_core::{End, Feature, FeatureKind, LinkType, PartOfSpeech, RelationType, Word};

use crate::error::{RuleResult, RuleTableError};
use crate::version::ensure_supported;

/// Default rule table shipped with the crate
pub const BUILTIN_TABLE: &str = include_str!("../rules/default.toml");

// ─────────────────────────────────────────────────────────────────────────────
// File format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    version: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    conjunction: RawConjunction,
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConjunction {
    #[serde(default)]
    non_distributable: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    name: String,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    slot: Option<String>,
    #[serde(default)]
    links: Vec<RawLink>,
    #[serde(default)]
    words: Vec<RawWord>,
    #[serde(default)]
    absent: Vec<RawAbsent>,
    /// Pairs of variables whose words must appear in this order
    #[serde(default)]
    order: Vec<[String; 2]>,
    #[serde(default)]
    emit: Vec<RawEmit>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLink {
    #[serde(rename = "type")]
    link_type: String,
    head: String,
    dep: String,
    #[serde(default)]
    claim: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWord {
    var: String,
    #[serde(default)]
    pos: Vec<String>,
    #[serde(default)]
    lemma: Vec<String>,
    #[serde(default)]
    not_lemma: Vec<String>,
    #[serde(default)]
    feature: Option<String>,
    #[serde(default)]
    not_feature: Option<String>,
    #[serde(default)]
    entity: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAbsent {
    var: String,
    #[serde(rename = "type")]
    link_type: String,
    #[serde(default)]
    end: Option<End>,
    #[serde(default)]
    partner_pos: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEmit {
    #[serde(default)]
    relation: Option<String>,
    #[serde(default)]
    named_by: Option<String>,
    #[serde(default)]
    governor: Option<String>,
    #[serde(default)]
    dependent: Option<String>,
    #[serde(default)]
    feature: Option<String>,
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    value_of: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Compiled form
// ─────────────────────────────────────────────────────────────────────────────

/// Index of a pattern variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

/// A required link between two variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClause {
    pub link_type: LinkType,
    pub head: VarId,
    pub dependent: VarId,
    /// Whether a firing claims this link under the rule's slot
    pub claim: bool,
}

/// Positive and negative guards on a bound word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGuard {
    pub pos: Vec<PartOfSpeech>,
    pub lemma: Vec<String>,
    pub not_lemma: Vec<String>,
    pub feature: Option<Feature>,
    pub not_feature: Option<Feature>,
    pub entity: Option<bool>,
}

impl WordGuard {
    pub fn accepts(&self, word: &Word) -> bool {
        if !self.pos.is_empty() && !self.pos.contains(&word.pos) {
            return false;
        }
        if !self.lemma.is_empty() && !self.lemma.iter().any(|l| word.is_lemma(l)) {
            return false;
        }
        if self.not_lemma.iter().any(|l| word.is_lemma(l)) {
            return false;
        }
        if self.feature.is_some_and(|f| !word.has_feature(f)) {
            return false;
        }
        if self.not_feature.is_some_and(|f| word.has_feature(f)) {
            return false;
        }
        self.entity.map_or(true, |entity| word.entity == entity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordClause {
    pub var: VarId,
    pub guard: WordGuard,
}

/// Negative constraint: the bound word must not carry this link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsentClause {
    pub var: VarId,
    pub link_type: LinkType,
    /// Only links where the bound word sits at this end count
    pub end: Option<End>,
    /// Only links whose other end has one of these parts of speech count
    pub partner_pos: Vec<PartOfSpeech>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub vars: Vec<String>,
    pub links: Vec<LinkClause>,
    pub words: Vec<WordClause>,
    pub absent: Vec<AbsentClause>,
    /// `(a, b)`: the word bound to `a` precedes the word bound to `b`
    pub order: Vec<(VarId, VarId)>,
}

impl Pattern {
    pub fn var_name(&self, var: VarId) -> &str {
        self.vars.get(var.0).map(String::as_str).unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationTemplate {
    Fixed(RelationType),
    /// Prepositional relation named by the bound word's lemma
    PrepNamedBy(VarId),
    /// `conj_<lemma>` named by the bound conjunction
    ConjNamedBy(VarId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTemplate {
    Literal(String),
    LemmaOf(VarId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Binary {
        relation: RelationTemplate,
        governor: VarId,
        dependent: VarId,
    },
    Unary {
        feature: FeatureKind,
        word: VarId,
        value: ValueTemplate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub priority: i32,
    /// Claim slot; rules sharing a slot compete for the same links
    pub slot: String,
    pub pattern: Pattern,
    pub actions: Vec<Action>,
}

/// Which relation types Conjunction Distribution may copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConjunctionPolicy {
    non_distributable: BTreeSet<RelationType>,
}

impl ConjunctionPolicy {
    pub fn new(non_distributable: impl IntoIterator<Item = RelationType>) -> Self {
        Self {
            non_distributable: non_distributable.into_iter().collect(),
        }
    }

    /// Coordination relations themselves are never distributable
    pub fn is_distributable(&self, kind: &RelationType) -> bool {
        !kind.is_conj() && !self.non_distributable.contains(kind)
    }

    pub fn non_distributable(&self) -> impl Iterator<Item = &RelationType> + '_ {
        self.non_distributable.iter()
    }
}

/// Loaded, validated and immutable rule configuration
#[derive(Debug, Clone)]
pub struct RuleTable {
    version: u32,
    name: String,
    rules: Vec<Rule>,
    conjunction: ConjunctionPolicy,
}

impl RuleTable {
    /// The table bundled with this crate
    pub fn builtin() -> RuleResult<Self> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    pub fn load(path: impl AsRef<Path>) -> RuleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), rules = table.rules.len(), "Loaded rule table");
        Ok(table)
    }

    pub fn from_toml_str(content: &str) -> RuleResult<Self> {
        let raw: RawTable = toml::from_str(content)?;
        ensure_supported(raw.version)?;

        if raw.rules.is_empty() {
            return Err(RuleTableError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut rules = Vec::with_capacity(raw.rules.len());
        for raw_rule in raw.rules {
            if !seen.insert(raw_rule.name.clone()) {
                return Err(RuleTableError::DuplicateRule(raw_rule.name));
            }
            rules.push(compile_rule(raw_rule)?);
        }
        rules.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));

        let non_distributable = raw
            .conjunction
            .non_distributable
            .iter()
            .map(|name| {
                RelationType::from_name(name)
                    .map_err(|e| RuleTableError::unknown_tag("[conjunction]", e))
            })
            .collect::<RuleResult<Vec<_>>>()?;

        Ok(Self {
            version: raw.version,
            name: raw.name.unwrap_or_else(|| "unnamed".to_string()),
            rules,
            conjunction: ConjunctionPolicy::new(non_distributable),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order: priority descending, then name
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn conjunction(&self) -> &ConjunctionPolicy {
        &self.conjunction
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compilation
// ─────────────────────────────────────────────────────────────────────────────

struct Vars<'a> {
    rule: &'a str,
    index: BTreeMap<String, VarId>,
    names: Vec<String>,
}

impl<'a> Vars<'a> {
    fn new(rule: &'a str) -> Self {
        Self {
            rule,
            index: BTreeMap::new(),
            names: Vec::new(),
        }
    }

    fn bind(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VarId(self.names.len());
        self.index.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    fn get(&self, name: &str) -> RuleResult<VarId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RuleTableError::UnboundVariable {
                rule: self.rule.to_string(),
                var: name.to_string(),
            })
    }

    fn require(&self, name: Option<&String>, field: &str) -> RuleResult<VarId> {
        match name {
            Some(name) => self.get(name),
            None => Err(RuleTableError::invalid(
                self.rule,
                format!("emit is missing '{}'", field),
            )),
        }
    }
}

fn compile_rule(raw: RawRule) -> RuleResult<Rule> {
    let rule = raw.name.as_str();
    if rule.trim().is_empty() {
        return Err(RuleTableError::invalid("<unnamed>", "rule name must not be empty"));
    }
    if raw.links.is_empty() && raw.words.is_empty() {
        return Err(RuleTableError::invalid(rule, "pattern has no link or word clauses"));
    }
    if raw.emit.is_empty() {
        return Err(RuleTableError::invalid(rule, "rule emits nothing"));
    }

    let tag = |e: relex_core::Error| RuleTableError::unknown_tag(rule, e);
    let mut vars = Vars::new(rule);

    let mut links = Vec::with_capacity(raw.links.len());
    for clause in &raw.links {
        if clause.head == clause.dep {
            return Err(RuleTableError::invalid(
                rule,
                format!("link {} joins '{}' to itself", clause.link_type, clause.head),
            ));
        }
        links.push(LinkClause {
            link_type: clause.link_type.parse().map_err(tag)?,
            head: vars.bind(&clause.head),
            dependent: vars.bind(&clause.dep),
            claim: clause.claim,
        });
    }

    let mut words = Vec::with_capacity(raw.words.len());
    for clause in &raw.words {
        let guard = WordGuard {
            pos: parse_all::<PartOfSpeech>(&clause.pos).map_err(tag)?,
            lemma: clause.lemma.clone(),
            not_lemma: clause.not_lemma.clone(),
            feature: clause.feature.as_deref().map(str::parse).transpose().map_err(tag)?,
            not_feature: clause
                .not_feature
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(tag)?,
            entity: clause.entity,
        };
        words.push(WordClause {
            var: vars.bind(&clause.var),
            guard,
        });
    }

    let mut absent = Vec::with_capacity(raw.absent.len());
    for clause in &raw.absent {
        absent.push(AbsentClause {
            var: vars.get(&clause.var)?,
            link_type: clause.link_type.parse().map_err(tag)?,
            end: clause.end,
            partner_pos: parse_all::<PartOfSpeech>(&clause.partner_pos).map_err(tag)?,
        });
    }

    let mut order = Vec::with_capacity(raw.order.len());
    for [first, second] in &raw.order {
        if first == second {
            return Err(RuleTableError::invalid(
                rule,
                format!("order relates '{}' to itself", first),
            ));
        }
        order.push((vars.get(first)?, vars.get(second)?));
    }

    let mut actions = Vec::with_capacity(raw.emit.len());
    for emit in &raw.emit {
        actions.push(compile_action(rule, emit, &vars)?);
    }

    Ok(Rule {
        name: raw.name.clone(),
        priority: raw.priority,
        slot: raw.slot.clone().unwrap_or_else(|| raw.name.clone()),
        pattern: Pattern {
            vars: vars.names,
            links,
            words,
            absent,
            order,
        },
        actions,
    })
}

fn compile_action(rule: &str, emit: &RawEmit, vars: &Vars<'_>) -> RuleResult<Action> {
    match (&emit.relation, &emit.feature) {
        (Some(relation), None) => {
            if emit.word.is_some() || emit.value.is_some() || emit.value_of.is_some() {
                return Err(RuleTableError::invalid(
                    rule,
                    format!("binary emit '{}' takes governor and dependent only", relation),
                ));
            }
            let template = match (relation.as_str(), &emit.named_by) {
                ("prep", Some(var)) => RelationTemplate::PrepNamedBy(vars.get(var)?),
                ("conj", Some(var)) => RelationTemplate::ConjNamedBy(vars.get(var)?),
                ("prep" | "conj", None) => {
                    return Err(RuleTableError::invalid(
                        rule,
                        format!("relation '{}' needs named_by", relation),
                    ))
                }
                (_, Some(_)) => {
                    return Err(RuleTableError::invalid(
                        rule,
                        format!("named_by is only valid for prep and conj, not '{}'", relation),
                    ))
                }
                (name, None) => RelationTemplate::Fixed(
                    RelationType::from_name(name)
                        .map_err(|e| RuleTableError::unknown_tag(rule, e))?,
                ),
            };
            Ok(Action::Binary {
                relation: template,
                governor: vars.require(emit.governor.as_ref(), "governor")?,
                dependent: vars.require(emit.dependent.as_ref(), "dependent")?,
            })
        }
        (None, Some(feature)) => {
            if emit.governor.is_some() || emit.dependent.is_some() || emit.named_by.is_some() {
                return Err(RuleTableError::invalid(
                    rule,
                    format!("feature emit '{}' takes word and value only", feature),
                ));
            }
            let value = match (&emit.value, &emit.value_of) {
                (Some(value), None) => ValueTemplate::Literal(value.clone()),
                (None, Some(var)) => ValueTemplate::LemmaOf(vars.get(var)?),
                _ => {
                    return Err(RuleTableError::invalid(
                        rule,
                        "feature emit needs exactly one of value or value_of",
                    ))
                }
            };
            Ok(Action::Unary {
                feature: feature
                    .parse()
                    .map_err(|e| RuleTableError::unknown_tag(rule, e))?,
                word: vars.require(emit.word.as_ref(), "word")?,
                value,
            })
        }
        _ => Err(RuleTableError::invalid(
            rule,
            "emit needs exactly one of relation or feature",
        )),
    }
}

fn parse_all<T>(names: &[String]) -> relex_core::Result<Vec<T>>
where
    T: std::str::FromStr<Err = relex_core::Error>,
{
    names.iter().map(|name| name.parse()).collect()
}
