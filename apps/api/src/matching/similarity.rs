//! SimilarityScorer — cosine similarity of unit vectors mapped onto a 0–100 scale.

use crate::matching::vectorizer::MatchVector;
use crate::matching::MatchError;

pub const MAX_SCORE: f64 = 100.0;

/// Dot product of two unit-normalized vectors, i.e. their cosine similarity.
pub fn cosine_similarity(a: &MatchVector, b: &MatchVector) -> Result<f64, MatchError> {
    if a.dimension() != b.dimension() {
        return Err(MatchError::DimensionMismatch {
            left: a.dimension(),
            right: b.dimension(),
        });
    }
    if a.is_zero() || b.is_zero() {
        return Ok(0.0);
    }
    Ok(a.weights
        .iter()
        .zip(&b.weights)
        .map(|(x, y)| x * y)
        .sum())
}

/// `round(similarity * 100, 2)`, clamped into `[0, 100]`.
pub fn to_score(similarity: f64) -> f64 {
    let scaled = ((similarity * MAX_SCORE) * 100.0).round() / 100.0;
    scaled.clamp(0.0, MAX_SCORE)
}

/// Scores two vectors from the same vectorization call.
pub fn score_vectors(a: &MatchVector, b: &MatchVector) -> Result<f64, MatchError> {
    cosine_similarity(a, b).map(to_score)
}
