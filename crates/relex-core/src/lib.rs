//! Relex Core - Linkage graphs and semantic relations
//!
//! This crate provides the data model shared by the Relex crates: the
//! immutable linkage graph produced by the syntactic parser, and the closed
//! vocabulary of binary and unary relations extracted from it.

pub mod error;
pub mod limits;
pub mod link;
pub mod linkage;
pub mod relation;
pub mod word;

pub use error::{Error, Result};
pub use limits::ValidationError;
pub use link::{End, Link, LinkId, LinkType, Orientation};
pub use linkage::{LinkInput, LinkageBuilder, LinkageGraph, LinkageInput};
pub use relation::{
    BinaryRelation, FeatureKind, FeatureTuple, Relation, RelationSet, RelationTuple, RelationType,
    UnaryRelation,
};
pub use word::{Feature, PartOfSpeech, Word, WordId};
