//! MatchingEngine — the single `score(resume, skills)` entry point.

use tracing::debug;

use crate::matching::similarity::score_vectors;
use crate::matching::vectorizer::vectorize;
use crate::matching::MatchError;

/// Stateless scorer. Every call vectorizes its own pair from scratch, so the score of one
/// pair never depends on documents seen earlier.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine;

impl MatchingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Relevance of `resume_text` to `skills_text` on a 0.00–100.00 scale.
    pub fn score(&self, resume_text: &str, skills_text: &str) -> Result<f64, MatchError> {
        let pair = vectorize(resume_text, skills_text)?;
        let score = score_vectors(&pair.resume, &pair.skills)?;
        debug!(vocabulary = pair.vocabulary.len(), score, "scored document pair");
        Ok(score)
    }
}
