//! Word (node) types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::Error;

/// Position of a word in its sentence, stable for the lifetime of a linkage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub u32);

impl WordId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Part-of-speech tag assigned upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Determiner,
    Pronoun,
    Number,
    Conjunction,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 11] = [
        Self::Noun,
        Self::Verb,
        Self::Adjective,
        Self::Adverb,
        Self::Preposition,
        Self::Determiner,
        Self::Pronoun,
        Self::Number,
        Self::Conjunction,
        Self::Punctuation,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Preposition => "preposition",
            Self::Determiner => "determiner",
            Self::Pronoun => "pronoun",
            Self::Number => "number",
            Self::Conjunction => "conjunction",
            Self::Punctuation => "punctuation",
            Self::Other => "other",
        }
    }

    /// Nouns and pronouns can both stand as antecedents and arguments
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Pronoun)
    }
}

impl FromStr for PartOfSpeech {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pos| pos.as_str() == s)
            .ok_or_else(|| Error::unknown_tag("part-of-speech", s))
    }
}

/// Morphological features attached upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Comparative,
    Superlative,
    Possessive,
    Auxiliary,
    Plural,
    Past,
    Present,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Self::Comparative,
        Self::Superlative,
        Self::Possessive,
        Self::Auxiliary,
        Self::Plural,
        Self::Past,
        Self::Present,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comparative => "comparative",
            Self::Superlative => "superlative",
            Self::Possessive => "possessive",
            Self::Auxiliary => "auxiliary",
            Self::Plural => "plural",
            Self::Past => "past",
            Self::Present => "present",
        }
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| Error::unknown_tag("feature", s))
    }
}

/// A word in a linkage (a node)
///
/// Multi-word proper nouns and idioms arrive already merged, e.g.
/// `Charles_Dickens` or `next_door`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,

    /// Form as it appears in the sentence
    pub surface: String,

    /// Dictionary form, used when printing relations
    #[serde(default)]
    pub lemma: String,

    pub pos: PartOfSpeech,

    #[serde(default)]
    pub features: BTreeSet<Feature>,

    /// Part of a merged named entity
    #[serde(default)]
    pub entity: bool,

    /// Part of a merged idiom span
    #[serde(default)]
    pub idiom: bool,
}

impl Word {
    pub fn new(
        id: u32,
        surface: impl Into<String>,
        lemma: impl Into<String>,
        pos: PartOfSpeech,
    ) -> Self {
        Self {
            id: WordId(id),
            surface: surface.into(),
            lemma: lemma.into(),
            pos,
            features: BTreeSet::new(),
            entity: false,
            idiom: false,
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn as_entity(mut self) -> Self {
        self.entity = true;
        self
    }

    pub fn as_idiom(mut self) -> Self {
        self.idiom = true;
        self
    }

    /// Name used in textual relations
    pub fn name(&self) -> &str {
        if self.lemma.is_empty() {
            &self.surface
        } else {
            &self.lemma
        }
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn is_lemma(&self, lemma: &str) -> bool {
        self.name().eq_ignore_ascii_case(lemma)
    }
}
