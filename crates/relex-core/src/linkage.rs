//! Linkage graph: the immutable word/link structure of one parse

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::limits::{validate_link_count, validate_word, validate_word_count};
use crate::link::{End, Link, LinkId, LinkType};
use crate::word::{Word, WordId};

/// Words and links for one parse hypothesis
///
/// Built once through [`LinkageBuilder`] and never mutated afterwards, so a
/// graph can be read from any number of pipeline stages at once.
#[derive(Debug, Clone)]
pub struct LinkageGraph {
    sentence: String,
    words: Vec<Word>,
    positions: BTreeMap<WordId, usize>,
    links: Vec<Link>,
    by_type: BTreeMap<LinkType, Vec<usize>>,
    by_word: BTreeMap<WordId, Vec<usize>>,
}

impl LinkageGraph {
    pub fn builder(sentence: impl Into<String>) -> LinkageBuilder {
        LinkageBuilder::new(sentence)
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.positions.get(&id).map(|&i| &self.words[i])
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Printable name of a word, empty for ids outside the graph
    pub fn name(&self, id: WordId) -> &str {
        self.word(id).map(Word::name).unwrap_or_default()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn links_of_type(&self, link_type: LinkType) -> impl Iterator<Item = &Link> + '_ {
        self.by_type
            .get(&link_type)
            .into_iter()
            .flatten()
            .map(move |&i| &self.links[i])
    }

    /// All links touching a word, in link order
    pub fn links_at(&self, word: WordId) -> impl Iterator<Item = &Link> + '_ {
        self.by_word
            .get(&word)
            .into_iter()
            .flatten()
            .map(move |&i| &self.links[i])
    }

    /// Heads of `link_type` links on which `word` is the dependent
    pub fn heads_of(&self, word: WordId, link_type: LinkType) -> impl Iterator<Item = WordId> + '_ {
        self.links_at(word)
            .filter(move |l| l.link_type == link_type && l.dependent() == word)
            .map(|l| l.head())
    }

    /// Dependents of `link_type` links headed by `word`
    pub fn dependents_of(
        &self,
        word: WordId,
        link_type: LinkType,
    ) -> impl Iterator<Item = WordId> + '_ {
        self.links_at(word)
            .filter(move |l| l.link_type == link_type && l.head() == word)
            .map(|l| l.dependent())
    }

    /// Whether `word` carries a `link_type` link, optionally only at one end
    pub fn has_link(&self, word: WordId, link_type: LinkType, end: Option<End>) -> bool {
        self.links_at(word).any(|l| {
            l.link_type == link_type
                && match end {
                    Some(end) => l.end(end) == word,
                    None => true,
                }
        })
    }
}

impl TryFrom<LinkageInput> for LinkageGraph {
    type Error = Error;

    fn try_from(input: LinkageInput) -> Result<Self> {
        let mut builder = LinkageBuilder::new(input.sentence);
        for word in input.words {
            builder = builder.word(word);
        }
        for link in input.links {
            builder = builder.link(link.link_type, link.left, link.right);
        }
        builder.build()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Collects words and links, validating everything on [`build`](Self::build)
#[derive(Debug, Clone, Default)]
pub struct LinkageBuilder {
    sentence: String,
    words: Vec<Word>,
    links: Vec<(LinkType, WordId, WordId)>,
}

impl LinkageBuilder {
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            ..Default::default()
        }
    }

    pub fn word(mut self, word: Word) -> Self {
        self.words.push(word);
        self
    }

    pub fn link(mut self, link_type: LinkType, left: u32, right: u32) -> Self {
        self.links.push((link_type, WordId(left), WordId(right)));
        self
    }

    pub fn build(self) -> Result<LinkageGraph> {
        validate_word_count(self.words.len())?;
        validate_link_count(self.links.len())?;

        let mut positions = BTreeMap::new();
        let mut previous: Option<WordId> = None;
        for (i, word) in self.words.iter().enumerate() {
            validate_word(word.id.0, &word.surface, &word.lemma)?;
            if previous.is_some_and(|p| p >= word.id) {
                return Err(Error::InvalidLinkage(format!(
                    "word ids must be strictly increasing, found {} after {}",
                    word.id,
                    previous.unwrap_or(word.id)
                )));
            }
            previous = Some(word.id);
            positions.insert(word.id, i);
        }

        let mut raw = self.links;
        for &(link_type, left, right) in &raw {
            for end in [left, right] {
                if !positions.contains_key(&end) {
                    return Err(Error::InvalidLinkage(format!(
                        "{} link refers to unknown word {}",
                        link_type, end
                    )));
                }
            }
            if left >= right {
                return Err(Error::InvalidLinkage(format!(
                    "{} link must run left to right, got {} -> {}",
                    link_type, left, right
                )));
            }
        }

        raw.sort_by_key(|&(link_type, left, right)| (left, right, link_type));
        if let Some(pair) = raw.windows(2).find(|pair| pair[0] == pair[1]) {
            let (link_type, left, right) = pair[0];
            return Err(Error::InvalidLinkage(format!(
                "duplicate {} link {} -> {}",
                link_type, left, right
            )));
        }

        let links: Vec<Link> = raw
            .into_iter()
            .enumerate()
            .map(|(i, (link_type, left, right))| Link {
                id: LinkId(i as u32),
                link_type,
                left,
                right,
            })
            .collect();

        let mut by_type: BTreeMap<LinkType, Vec<usize>> = BTreeMap::new();
        let mut by_word: BTreeMap<WordId, Vec<usize>> = BTreeMap::new();
        for (i, link) in links.iter().enumerate() {
            by_type.entry(link.link_type).or_default().push(i);
            by_word.entry(link.left).or_default().push(i);
            by_word.entry(link.right).or_default().push(i);
        }

        tracing::trace!(
            words = self.words.len(),
            links = links.len(),
            "Built linkage graph"
        );

        Ok(LinkageGraph {
            sentence: self.sentence,
            words: self.words,
            positions,
            links,
            by_type,
            by_word,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interchange form
// ─────────────────────────────────────────────────────────────────────────────

/// JSON form of a linkage as handed over by the parser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkageInput {
    #[serde(default)]
    pub sentence: String,
    pub words: Vec<Word>,
    #[serde(default)]
    pub links: Vec<LinkInput>,
}

impl LinkageInput {
    /// Parse one linkage object or an array of them
    pub fn from_json(content: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let inputs: Vec<Self> = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<_>, _>>()?,
            other => vec![serde_json::from_value(other)?],
        };
        Ok(inputs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkInput {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub left: u32,
    pub right: u32,
}
