//! Hand-built linkages shared by the engine tests

use std::collections::BTreeSet;
use std::sync::Arc;

use relex_core::{
    Feature, LinkType as L, LinkageGraph, PartOfSpeech as P, Relation, RelationSet, Word,
};
use relex_rules::RuleTable;

use crate::conjunction::ConjunctionDistributor;
use crate::matcher::RuleEngine;
use crate::traits::Stage;

pub fn word(id: u32, surface: &str, lemma: &str, pos: P) -> Word {
    Word::new(id, surface, lemma, pos)
}

pub fn table() -> Arc<RuleTable> {
    Arc::new(RuleTable::builtin().unwrap())
}

pub fn render(graph: &LinkageGraph, relations: &[Relation]) -> BTreeSet<String> {
    relations.iter().map(|r| r.render(graph)).collect()
}

/// Output of the stages that run before the comparative resolver
pub fn before_comparatives(graph: &LinkageGraph) -> RelationSet {
    let table = table();
    let mut found: RelationSet = RuleEngine::new(Arc::clone(&table))
        .run(graph, &RelationSet::new())
        .into_iter()
        .collect();
    let distributed = ConjunctionDistributor::from_table(&table).run(graph, &found);
    found.extend(distributed);
    found
}

fn linkage(sentence: &str, words: Vec<Word>, links: &[(L, u32, u32)]) -> LinkageGraph {
    let mut builder = LinkageGraph::builder(sentence);
    for w in words {
        builder = builder.word(w);
    }
    for &(t, left, right) in links {
        builder = builder.link(t, left, right);
    }
    builder.build().unwrap()
}

pub fn all() -> Vec<LinkageGraph> {
    vec![
        likes_pigs_less(),
        scientists(),
        nurse(),
        baked_him_a_cake(),
        more_intelligent("more"),
        more_intelligent("less"),
        copula_takes_than("more"),
        copula_takes_than("less"),
        more_intelligent_no_than(),
        more_quickly_than_john_does(),
        runs_faster(),
        more_miles(),
        ten_more_miles(),
        fewer_miles(),
        ten_fewer_miles(),
        more_often_than_ben_climbs(),
        more_races_than_ben_wins(),
        more_intelligent_man_runs_faster(),
        books_by_dickens(),
        whose_author(),
        police_car(),
        stacked_relatives(),
        truck_and_car(),
        black_and_white_taxi(),
        between_car_and_truck(),
        tom_dick_and_harry(),
        ate_dinner_and_went_to_movies(),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Core sentences
// ─────────────────────────────────────────────────────────────────────────────

pub fn likes_pigs_less() -> LinkageGraph {
    linkage(
        "Some people like pigs less than dogs.",
        vec![
            word(0, "Some", "some", P::Determiner),
            word(1, "people", "people", P::Noun),
            word(2, "like", "like", P::Verb),
            word(3, "pigs", "pig", P::Noun),
            word(4, "less", "less", P::Adverb),
            word(5, "than", "than", P::Preposition),
            word(6, "dogs", "dog", P::Noun),
            word(7, ".", ".", P::Punctuation),
        ],
        &[
            (L::Determiner, 0, 1),
            (L::Subject, 1, 2),
            (L::Object, 2, 3),
            (L::VerbModifier, 2, 4),
            (L::ThanAttach, 2, 5),
            (L::ThanObject, 5, 6),
            (L::Punctuation, 2, 7),
        ],
    )
}

pub fn scientists() -> LinkageGraph {
    linkage(
        "Scientists make observations and ask questions.",
        vec![
            word(0, "Scientists", "scientist", P::Noun),
            word(1, "make", "make", P::Verb),
            word(2, "observations", "observation", P::Noun),
            word(3, "and", "and", P::Conjunction),
            word(4, "ask", "ask", P::Verb),
            word(5, "questions", "question", P::Noun),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 2),
            (L::VerbConjLeft, 1, 3),
            (L::VerbConjRight, 3, 4),
            (L::Object, 4, 5),
        ],
    )
}

pub fn nurse() -> LinkageGraph {
    linkage(
        "The woman who lives next door is a registered nurse.",
        vec![
            word(0, "The", "the", P::Determiner),
            word(1, "woman", "woman", P::Noun),
            word(2, "who", "who", P::Pronoun),
            word(3, "lives", "live", P::Verb),
            word(4, "next_door", "next_door", P::Adverb).as_idiom(),
            word(5, "is", "be", P::Verb),
            word(6, "a", "a", P::Determiner),
            word(7, "registered", "registered", P::Adjective),
            word(8, "nurse", "nurse", P::Noun),
        ],
        &[
            (L::Determiner, 0, 1),
            (L::Relative, 1, 2),
            (L::Subject, 1, 5),
            (L::RelativeSubject, 2, 3),
            (L::VerbModifier, 3, 4),
            (L::Object, 5, 8),
            (L::Determiner, 6, 8),
            (L::Adjectival, 7, 8),
        ],
    )
}

pub fn baked_him_a_cake() -> LinkageGraph {
    linkage(
        "She baked him a cake.",
        vec![
            word(0, "She", "she", P::Pronoun),
            word(1, "baked", "bake", P::Verb),
            word(2, "him", "him", P::Pronoun),
            word(3, "a", "a", P::Determiner),
            word(4, "cake", "cake", P::Noun),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 2),
            (L::Object, 1, 4),
            (L::Determiner, 3, 4),
        ],
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Comparatives
// ─────────────────────────────────────────────────────────────────────────────

/// "He is more intelligent than John", or "less" in place of "more"
pub fn more_intelligent(degree: &str) -> LinkageGraph {
    linkage(
        &format!("He is {} intelligent than John.", degree),
        vec![
            word(0, "He", "he", P::Pronoun),
            word(1, "is", "be", P::Verb),
            word(2, degree, degree, P::Adverb),
            word(3, "intelligent", "intelligent", P::Adjective),
            word(4, "than", "than", P::Preposition),
            word(5, "John", "John", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::PredAdjective, 1, 3),
            (L::AdjectiveDegree, 2, 3),
            (L::ThanAttach, 3, 4),
            (L::ThanObject, 4, 5),
        ],
    )
}

/// Same sentence with "than" attached to the copula instead of the adjective
pub fn copula_takes_than(degree: &str) -> LinkageGraph {
    linkage(
        &format!("He is {} intelligent than John.", degree),
        vec![
            word(0, "He", "he", P::Pronoun),
            word(1, "is", "be", P::Verb),
            word(2, degree, degree, P::Adverb),
            word(3, "intelligent", "intelligent", P::Adjective),
            word(4, "than", "than", P::Preposition),
            word(5, "John", "John", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::PredAdjective, 1, 3),
            (L::AdjectiveDegree, 2, 3),
            (L::ThanAttach, 1, 4),
            (L::ThanObject, 4, 5),
        ],
    )
}

pub fn more_intelligent_no_than() -> LinkageGraph {
    linkage(
        "He is more intelligent.",
        vec![
            word(0, "He", "he", P::Pronoun),
            word(1, "is", "be", P::Verb),
            word(2, "more", "more", P::Adverb),
            word(3, "intelligent", "intelligent", P::Adjective),
        ],
        &[
            (L::Subject, 0, 1),
            (L::PredAdjective, 1, 3),
            (L::AdjectiveDegree, 2, 3),
        ],
    )
}

pub fn more_quickly_than_john_does() -> LinkageGraph {
    linkage(
        "He runs more quickly than John does.",
        vec![
            word(0, "He", "he", P::Pronoun),
            word(1, "runs", "run", P::Verb),
            word(2, "more", "more", P::Adverb),
            word(3, "quickly", "quickly", P::Adverb),
            word(4, "than", "than", P::Preposition),
            word(5, "John", "John", P::Noun).as_entity(),
            word(6, "does", "do", P::Verb),
        ],
        &[
            (L::Subject, 0, 1),
            (L::VerbModifier, 1, 3),
            (L::AdverbDegree, 2, 3),
            (L::ThanAttach, 3, 4),
            (L::ThanClause, 4, 6),
            (L::Subject, 5, 6),
        ],
    )
}

pub fn runs_faster() -> LinkageGraph {
    linkage(
        "He runs faster than John.",
        vec![
            word(0, "He", "he", P::Pronoun),
            word(1, "runs", "run", P::Verb),
            word(2, "faster", "fast", P::Adverb).with_feature(Feature::Comparative),
            word(3, "than", "than", P::Preposition),
            word(4, "John", "John", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::VerbModifier, 1, 2),
            (L::ThanAttach, 2, 3),
            (L::ThanObject, 3, 4),
        ],
    )
}

pub fn more_miles() -> LinkageGraph {
    linkage(
        "I run more miles than Ben.",
        vec![
            word(0, "I", "I", P::Pronoun),
            word(1, "run", "run", P::Verb),
            word(2, "more", "more", P::Determiner),
            word(3, "miles", "mile", P::Noun),
            word(4, "than", "than", P::Preposition),
            word(5, "Ben", "Ben", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 3),
            (L::Determiner, 2, 3),
            (L::ThanAttach, 1, 4),
            (L::ThanObject, 4, 5),
        ],
    )
}

pub fn ten_more_miles() -> LinkageGraph {
    linkage(
        "I run 10 more miles than Ben.",
        vec![
            word(0, "I", "I", P::Pronoun),
            word(1, "run", "run", P::Verb),
            word(2, "10", "10", P::Number),
            word(3, "more", "more", P::Determiner),
            word(4, "miles", "mile", P::Noun),
            word(5, "than", "than", P::Preposition),
            word(6, "Ben", "Ben", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 4),
            (L::Determiner, 2, 4),
            (L::Determiner, 3, 4),
            (L::ThanAttach, 1, 5),
            (L::ThanObject, 5, 6),
        ],
    )
}

pub fn fewer_miles() -> LinkageGraph {
    linkage(
        "I run fewer miles than Ben.",
        vec![
            word(0, "I", "I", P::Pronoun),
            word(1, "run", "run", P::Verb),
            word(2, "fewer", "fewer", P::Determiner),
            word(3, "miles", "mile", P::Noun),
            word(4, "than", "than", P::Preposition),
            word(5, "Ben", "Ben", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 3),
            (L::Determiner, 2, 3),
            (L::ThanAttach, 1, 4),
            (L::ThanObject, 4, 5),
        ],
    )
}

pub fn ten_fewer_miles() -> LinkageGraph {
    linkage(
        "I run 10 fewer miles than Ben.",
        vec![
            word(0, "I", "I", P::Pronoun),
            word(1, "run", "run", P::Verb),
            word(2, "10", "10", P::Number),
            word(3, "fewer", "fewer", P::Determiner),
            word(4, "miles", "mile", P::Noun),
            word(5, "than", "than", P::Preposition),
            word(6, "Ben", "Ben", P::Noun).as_entity(),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 4),
            (L::Determiner, 2, 4),
            (L::Determiner, 3, 4),
            (L::ThanAttach, 1, 5),
            (L::ThanObject, 5, 6),
        ],
    )
}

/// Clausal complement whose verb has no object
pub fn more_often_than_ben_climbs() -> LinkageGraph {
    linkage(
        "I run more often than Ben climbs.",
        vec![
            word(0, "I", "I", P::Pronoun),
            word(1, "run", "run", P::Verb),
            word(2, "more", "more", P::Adverb),
            word(3, "often", "often", P::Adverb),
            word(4, "than", "than", P::Preposition),
            word(5, "Ben", "Ben", P::Noun).as_entity(),
            word(6, "climbs", "climb", P::Verb),
        ],
        &[
            (L::Subject, 0, 1),
            (L::VerbModifier, 1, 3),
            (L::AdverbDegree, 2, 3),
            (L::ThanAttach, 3, 4),
            (L::ThanClause, 4, 6),
            (L::Subject, 5, 6),
        ],
    )
}

pub fn more_races_than_ben_wins() -> LinkageGraph {
    linkage(
        "I run more races than Ben wins contests.",
        vec![
            word(0, "I", "I", P::Pronoun),
            word(1, "run", "run", P::Verb),
            word(2, "more", "more", P::Determiner),
            word(3, "races", "race", P::Noun),
            word(4, "than", "than", P::Preposition),
            word(5, "Ben", "Ben", P::Noun).as_entity(),
            word(6, "wins", "win", P::Verb),
            word(7, "contests", "contest", P::Noun),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 3),
            (L::Determiner, 2, 3),
            (L::ThanAttach, 1, 4),
            (L::ThanClause, 4, 6),
            (L::Subject, 5, 6),
            (L::Object, 6, 7),
        ],
    )
}

/// Two triggers: the attributive one has no "than" and must not disturb the other
pub fn more_intelligent_man_runs_faster() -> LinkageGraph {
    linkage(
        "The more intelligent man runs faster than John.",
        vec![
            word(0, "The", "the", P::Determiner),
            word(1, "more", "more", P::Adverb),
            word(2, "intelligent", "intelligent", P::Adjective),
            word(3, "man", "man", P::Noun),
            word(4, "runs", "run", P::Verb),
            word(5, "faster", "fast", P::Adverb).with_feature(Feature::Comparative),
            word(6, "than", "than", P::Preposition),
            word(7, "John", "John", P::Noun).as_entity(),
        ],
        &[
            (L::Determiner, 0, 3),
            (L::AdjectiveDegree, 1, 2),
            (L::Adjectival, 2, 3),
            (L::Subject, 3, 4),
            (L::VerbModifier, 4, 5),
            (L::ThanAttach, 5, 6),
            (L::ThanObject, 6, 7),
        ],
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Relative clauses
// ─────────────────────────────────────────────────────────────────────────────

pub fn books_by_dickens() -> LinkageGraph {
    linkage(
        "The books which I read in the library were written by Charles Dickens.",
        vec![
            word(0, "The", "the", P::Determiner),
            word(1, "books", "book", P::Noun),
            word(2, "which", "which", P::Pronoun),
            word(3, "I", "I", P::Pronoun),
            word(4, "read", "read", P::Verb),
            word(5, "in", "in", P::Preposition),
            word(6, "the", "the", P::Determiner),
            word(7, "library", "library", P::Noun),
            word(8, "were", "be", P::Verb),
            word(9, "written", "write", P::Verb),
            word(10, "by", "by", P::Preposition),
            word(11, "Charles_Dickens", "Charles_Dickens", P::Noun).as_entity(),
        ],
        &[
            (L::Determiner, 0, 1),
            (L::Relative, 1, 2),
            (L::Extracted, 1, 4),
            (L::Subject, 1, 8),
            (L::Subject, 3, 4),
            (L::VerbModifier, 4, 5),
            (L::PrepObject, 5, 7),
            (L::Determiner, 6, 7),
            (L::Passive, 8, 9),
            (L::VerbModifier, 9, 10),
            (L::PrepObject, 10, 11),
        ],
    )
}

pub fn whose_author() -> LinkageGraph {
    linkage(
        "This is the book whose author I met in a library.",
        vec![
            word(0, "This", "this", P::Pronoun),
            word(1, "is", "be", P::Verb),
            word(2, "the", "the", P::Determiner),
            word(3, "book", "book", P::Noun),
            word(4, "whose", "whose", P::Determiner),
            word(5, "author", "author", P::Noun),
            word(6, "I", "I", P::Pronoun),
            word(7, "met", "meet", P::Verb),
            word(8, "in", "in", P::Preposition),
            word(9, "a", "a", P::Determiner),
            word(10, "library", "library", P::Noun),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 3),
            (L::Determiner, 2, 3),
            (L::Relative, 3, 4),
            (L::Determiner, 4, 5),
            (L::Extracted, 5, 7),
            (L::Subject, 6, 7),
            (L::VerbModifier, 7, 8),
            (L::PrepObject, 8, 10),
            (L::Determiner, 9, 10),
        ],
    )
}

pub fn police_car() -> LinkageGraph {
    linkage(
        "Jack stopped the police car that was driving fast.",
        vec![
            word(0, "Jack", "Jack", P::Noun).as_entity(),
            word(1, "stopped", "stop", P::Verb),
            word(2, "the", "the", P::Determiner),
            word(3, "police", "police", P::Noun),
            word(4, "car", "car", P::Noun),
            word(5, "that", "that", P::Pronoun),
            word(6, "was", "be", P::Verb),
            word(7, "driving", "drive", P::Verb),
            word(8, "fast", "fast", P::Adverb),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 4),
            (L::Determiner, 2, 4),
            (L::NounModifier, 3, 4),
            (L::Relative, 4, 5),
            (L::RelativeSubject, 5, 6),
            (L::Progressive, 6, 7),
            (L::VerbModifier, 7, 8),
        ],
    )
}

/// "that" has no `R` link of its own; "dog" is taken by "which"
pub fn stacked_relatives() -> LinkageGraph {
    linkage(
        "cat dog that sleeps which barks",
        vec![
            word(0, "cat", "cat", P::Noun),
            word(1, "dog", "dog", P::Noun),
            word(2, "that", "that", P::Pronoun),
            word(3, "sleeps", "sleep", P::Verb),
            word(4, "which", "which", P::Pronoun),
            word(5, "barks", "bark", P::Verb),
        ],
        &[
            (L::Relative, 1, 4),
            (L::RelativeSubject, 2, 3),
            (L::RelativeSubject, 4, 5),
        ],
    )
}

pub fn relativizer_without_antecedent() -> LinkageGraph {
    linkage(
        "who left",
        vec![
            word(0, "who", "who", P::Pronoun),
            word(1, "left", "leave", P::Verb),
        ],
        &[(L::RelativeSubject, 0, 1)],
    )
}

pub fn that_dog_barks() -> LinkageGraph {
    linkage(
        "That dog barks.",
        vec![
            word(0, "That", "that", P::Determiner),
            word(1, "dog", "dog", P::Noun),
            word(2, "barks", "bark", P::Verb),
        ],
        &[(L::Determiner, 0, 1), (L::Subject, 1, 2)],
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Coordination
// ─────────────────────────────────────────────────────────────────────────────

pub fn truck_and_car() -> LinkageGraph {
    linkage(
        "The truck and the car collided.",
        vec![
            word(0, "The", "the", P::Determiner),
            word(1, "truck", "truck", P::Noun),
            word(2, "and", "and", P::Conjunction),
            word(3, "the", "the", P::Determiner),
            word(4, "car", "car", P::Noun),
            word(5, "collided", "collide", P::Verb),
        ],
        &[
            (L::Determiner, 0, 1),
            (L::NounConjLeft, 1, 2),
            (L::NounConjRight, 2, 4),
            (L::Determiner, 3, 4),
            (L::Subject, 1, 5),
        ],
    )
}

pub fn black_and_white_taxi() -> LinkageGraph {
    linkage(
        "black and white taxi",
        vec![
            word(0, "black", "black", P::Adjective),
            word(1, "and", "and", P::Conjunction),
            word(2, "white", "white", P::Adjective),
            word(3, "taxi", "taxi", P::Noun),
        ],
        &[
            (L::AdjectiveConjLeft, 0, 1),
            (L::AdjectiveConjRight, 1, 2),
            (L::Adjectival, 0, 3),
        ],
    )
}

pub fn between_car_and_truck() -> LinkageGraph {
    linkage(
        "The dog is between the car and the truck.",
        vec![
            word(0, "The", "the", P::Determiner),
            word(1, "dog", "dog", P::Noun),
            word(2, "is", "be", P::Verb),
            word(3, "between", "between", P::Preposition),
            word(4, "the", "the", P::Determiner),
            word(5, "car", "car", P::Noun),
            word(6, "and", "and", P::Conjunction),
            word(7, "the", "the", P::Determiner),
            word(8, "truck", "truck", P::Noun),
        ],
        &[
            (L::Determiner, 0, 1),
            (L::Subject, 1, 2),
            (L::PredPrep, 2, 3),
            (L::PrepObject, 3, 5),
            (L::Determiner, 4, 5),
            (L::NounConjLeft, 5, 6),
            (L::NounConjRight, 6, 8),
            (L::Determiner, 7, 8),
        ],
    )
}

pub fn tom_dick_and_harry() -> LinkageGraph {
    linkage(
        "Tom and Dick and Harry ran.",
        vec![
            word(0, "Tom", "Tom", P::Noun).as_entity(),
            word(1, "and", "and", P::Conjunction),
            word(2, "Dick", "Dick", P::Noun).as_entity(),
            word(3, "and", "and", P::Conjunction),
            word(4, "Harry", "Harry", P::Noun).as_entity(),
            word(5, "ran", "run", P::Verb),
        ],
        &[
            (L::NounConjLeft, 0, 1),
            (L::NounConjRight, 1, 2),
            (L::NounConjLeft, 2, 3),
            (L::NounConjRight, 3, 4),
            (L::Subject, 0, 5),
        ],
    )
}

/// Each verb keeps the arguments to its right
pub fn ate_dinner_and_went_to_movies() -> LinkageGraph {
    linkage(
        "We ate dinner at home and went to the movies.",
        vec![
            word(0, "We", "we", P::Pronoun),
            word(1, "ate", "eat", P::Verb),
            word(2, "dinner", "dinner", P::Noun),
            word(3, "at", "at", P::Preposition),
            word(4, "home", "home", P::Noun),
            word(5, "and", "and", P::Conjunction),
            word(6, "went", "go", P::Verb),
            word(7, "to", "to", P::Preposition),
            word(8, "the", "the", P::Determiner),
            word(9, "movies", "movie", P::Noun),
        ],
        &[
            (L::Subject, 0, 1),
            (L::Object, 1, 2),
            (L::VerbModifier, 1, 3),
            (L::PrepObject, 3, 4),
            (L::VerbConjLeft, 1, 5),
            (L::VerbConjRight, 5, 6),
            (L::VerbModifier, 6, 7),
            (L::PrepObject, 7, 9),
            (L::Determiner, 8, 9),
        ],
    )
}
