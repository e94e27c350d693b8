//! Link (edge) types and their head orientation

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;
use crate::word::WordId;

/// Identifier of a link within one linkage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub u32);

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which end of a link is the syntactic head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    HeadLeft,
    HeadRight,
}

/// One end of a link, as addressed by rule patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Head,
    Dependent,
}

/// Closed set of link types produced by the grammar parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Attributive adjective to noun
    #[serde(rename = "A")]
    Adjectival,
    /// Noun modifier to noun
    #[serde(rename = "AN")]
    NounModifier,
    #[serde(rename = "AJl")]
    AdjectiveConjLeft,
    #[serde(rename = "AJr")]
    AdjectiveConjRight,
    /// Extracted (relativized) object to the embedded verb
    #[serde(rename = "B")]
    Extracted,
    /// "than" to the verb of a clausal complement
    #[serde(rename = "Ct")]
    ThanClause,
    #[serde(rename = "D")]
    Determiner,
    /// Pre-verbal adverb
    #[serde(rename = "E")]
    Preverbal,
    /// Adverb to adjective
    #[serde(rename = "EA")]
    AdjectiveDegree,
    /// Adverb to adverb
    #[serde(rename = "EE")]
    AdverbDegree,
    /// Adverb to number
    #[serde(rename = "EN")]
    NumberModifier,
    /// Infinitive marker to verb
    #[serde(rename = "I")]
    Infinitive,
    /// Preposition to its object
    #[serde(rename = "J")]
    PrepObject,
    /// "than" to a nominal complement
    #[serde(rename = "Jt")]
    ThanObject,
    /// Verb to post-verbal modifier
    #[serde(rename = "MV")]
    VerbModifier,
    /// Comparative head or clause verb to "than"
    #[serde(rename = "MVt")]
    ThanAttach,
    /// Noun to prepositional modifier
    #[serde(rename = "Mp")]
    NounPrep,
    #[serde(rename = "O")]
    Object,
    #[serde(rename = "Pa")]
    PredAdjective,
    #[serde(rename = "Pg")]
    Progressive,
    #[serde(rename = "Pp")]
    PredPrep,
    #[serde(rename = "Pv")]
    Passive,
    /// Noun to the relative pronoun of its relative clause
    #[serde(rename = "R")]
    Relative,
    #[serde(rename = "RJl")]
    AdverbConjLeft,
    #[serde(rename = "RJr")]
    AdverbConjRight,
    /// Relative pronoun acting as subject of the embedded verb
    #[serde(rename = "RS")]
    RelativeSubject,
    #[serde(rename = "S")]
    Subject,
    #[serde(rename = "SJl")]
    NounConjLeft,
    #[serde(rename = "SJr")]
    NounConjRight,
    /// Verb to infinitival "to"
    #[serde(rename = "TO")]
    ToVerb,
    #[serde(rename = "VJl")]
    VerbConjLeft,
    #[serde(rename = "VJr")]
    VerbConjRight,
    #[serde(rename = "W")]
    Wall,
    #[serde(rename = "X")]
    Punctuation,
    /// Possessor noun to the possessive clitic
    #[serde(rename = "YS")]
    PossessiveClitic,
}

/// Every link type, in tag order
const ALL_LINK_TYPES: [LinkType; 35] = [
    LinkType::Adjectival,
    LinkType::NounModifier,
    LinkType::AdjectiveConjLeft,
    LinkType::AdjectiveConjRight,
    LinkType::Extracted,
    LinkType::ThanClause,
    LinkType::Determiner,
    LinkType::Preverbal,
    LinkType::AdjectiveDegree,
    LinkType::AdverbDegree,
    LinkType::NumberModifier,
    LinkType::Infinitive,
    LinkType::PrepObject,
    LinkType::ThanObject,
    LinkType::VerbModifier,
    LinkType::ThanAttach,
    LinkType::NounPrep,
    LinkType::Object,
    LinkType::PredAdjective,
    LinkType::Progressive,
    LinkType::PredPrep,
    LinkType::Passive,
    LinkType::Relative,
    LinkType::AdverbConjLeft,
    LinkType::AdverbConjRight,
    LinkType::RelativeSubject,
    LinkType::Subject,
    LinkType::NounConjLeft,
    LinkType::NounConjRight,
    LinkType::ToVerb,
    LinkType::VerbConjLeft,
    LinkType::VerbConjRight,
    LinkType::Wall,
    LinkType::Punctuation,
    LinkType::PossessiveClitic,
];

impl LinkType {
    /// The link-grammar tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adjectival => "A",
            Self::NounModifier => "AN",
            Self::AdjectiveConjLeft => "AJl",
            Self::AdjectiveConjRight => "AJr",
            Self::Extracted => "B",
            Self::ThanClause => "Ct",
            Self::Determiner => "D",
            Self::Preverbal => "E",
            Self::AdjectiveDegree => "EA",
            Self::AdverbDegree => "EE",
            Self::NumberModifier => "EN",
            Self::Infinitive => "I",
            Self::PrepObject => "J",
            Self::ThanObject => "Jt",
            Self::VerbModifier => "MV",
            Self::ThanAttach => "MVt",
            Self::NounPrep => "Mp",
            Self::Object => "O",
            Self::PredAdjective => "Pa",
            Self::Progressive => "Pg",
            Self::PredPrep => "Pp",
            Self::Passive => "Pv",
            Self::Relative => "R",
            Self::AdverbConjLeft => "RJl",
            Self::AdverbConjRight => "RJr",
            Self::RelativeSubject => "RS",
            Self::Subject => "S",
            Self::NounConjLeft => "SJl",
            Self::NounConjRight => "SJr",
            Self::ToVerb => "TO",
            Self::VerbConjLeft => "VJl",
            Self::VerbConjRight => "VJr",
            Self::Wall => "W",
            Self::Punctuation => "X",
            Self::PossessiveClitic => "YS",
        }
    }

    pub fn orientation(&self) -> Orientation {
        match self {
            Self::AdjectiveConjRight
            | Self::ThanClause
            | Self::Infinitive
            | Self::PrepObject
            | Self::ThanObject
            | Self::VerbModifier
            | Self::ThanAttach
            | Self::NounPrep
            | Self::Object
            | Self::PredAdjective
            | Self::Progressive
            | Self::PredPrep
            | Self::Passive
            | Self::Relative
            | Self::AdverbConjRight
            | Self::NounConjRight
            | Self::ToVerb
            | Self::VerbConjRight
            | Self::Wall
            | Self::Punctuation
            | Self::PossessiveClitic => Orientation::HeadLeft,
            Self::Adjectival
            | Self::NounModifier
            | Self::AdjectiveConjLeft
            | Self::Extracted
            | Self::Determiner
            | Self::Preverbal
            | Self::AdjectiveDegree
            | Self::AdverbDegree
            | Self::NumberModifier
            | Self::AdverbConjLeft
            | Self::RelativeSubject
            | Self::Subject
            | Self::NounConjLeft
            | Self::VerbConjLeft => Orientation::HeadRight,
        }
    }

    pub fn all() -> impl Iterator<Item = LinkType> {
        ALL_LINK_TYPES.into_iter()
    }
}

impl FromStr for LinkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkType::all()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::unknown_tag("link", s))
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed link between two words, `left` preceding `right`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub link_type: LinkType,
    pub left: WordId,
    pub right: WordId,
}

impl Link {
    pub fn head(&self) -> WordId {
        match self.link_type.orientation() {
            Orientation::HeadLeft => self.left,
            Orientation::HeadRight => self.right,
        }
    }

    pub fn dependent(&self) -> WordId {
        match self.link_type.orientation() {
            Orientation::HeadLeft => self.right,
            Orientation::HeadRight => self.left,
        }
    }

    pub fn end(&self, end: End) -> WordId {
        match end {
            End::Head => self.head(),
            End::Dependent => self.dependent(),
        }
    }

    /// The end opposite to `word`, if `word` is on this link
    pub fn other(&self, word: WordId) -> Option<WordId> {
        if self.left == word {
            Some(self.right)
        } else if self.right == word {
            Some(self.left)
        } else {
            None
        }
    }
}
