// Matching engine: tokenization, two-document TF-IDF, cosine scoring.
// Pure CPU work; no I/O and no state shared between calls.

pub mod engine;
pub mod handlers;
pub mod similarity;
pub mod stop_words;
pub mod vectorizer;

use thiserror::Error;

pub use engine::MatchingEngine;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// Both documents reduced to nothing after tokenization and stop-word removal.
    #[error("resume and skills text contain no scorable terms")]
    EmptyVocabulary,

    #[error("vector dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },
}
