//! TextVectorizer — smoothed TF-IDF over exactly two documents.
//!
//! The vocabulary and document frequencies are rebuilt on every call, so a pair of
//! documents is only ever weighted against itself.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::matching::stop_words::is_stop_word;
use crate::matching::MatchError;

/// Number of documents in one comparison (resume + skills).
const DOCUMENT_COUNT: f64 = 2.0;

/// Weighted-term vector for one document. Transient: lives for one scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchVector {
    pub weights: Vec<f64>,
}

impl MatchVector {
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    pub fn is_zero(&self) -> bool {
        self.weights.iter().all(|w| *w == 0.0)
    }
}

/// Output of vectorizing a (resume, skills) pair.
#[derive(Debug, Clone)]
pub struct VectorPair {
    /// Alphabetical vocabulary; position == vector index.
    pub vocabulary: Vec<String>,
    pub resume: MatchVector,
    pub skills: MatchVector,
}

/// Runs of two or more letters, numbers or underscores. Combining marks are not word
/// characters, so they split a token.
static WORD: OnceLock<Regex> = OnceLock::new();

fn word_pattern() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"[\p{L}\p{N}_]{2,}").expect("word pattern is valid"))
}

/// Splits text into lowercase word tokens of two or more word characters and drops
/// stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
pub fn smoothed_idf(document_frequency: usize) -> f64 {
    ((1.0 + DOCUMENT_COUNT) / (1.0 + document_frequency as f64)).ln() + 1.0
}

/// Vectorizes the two documents against their shared vocabulary.
///
/// Fails with [`MatchError::EmptyVocabulary`] when neither document contributes a term.
pub fn vectorize(resume_text: &str, skills_text: &str) -> Result<VectorPair, MatchError> {
    let resume_counts = term_counts(&tokenize(resume_text));
    let skills_counts = term_counts(&tokenize(skills_text));

    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    for term in resume_counts.keys().chain(skills_counts.keys()) {
        index.entry(term.as_str()).or_insert(0);
    }
    if index.is_empty() {
        return Err(MatchError::EmptyVocabulary);
    }
    for (position, slot) in index.values_mut().enumerate() {
        *slot = position;
    }

    let vocabulary: Vec<String> = index.keys().map(|term| term.to_string()).collect();
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|term| {
            let df = usize::from(resume_counts.contains_key(term))
                + usize::from(skills_counts.contains_key(term));
            smoothed_idf(df)
        })
        .collect();

    let resume = weigh(&resume_counts, &index, &idf);
    let skills = weigh(&skills_counts, &index, &idf);

    Ok(VectorPair {
        vocabulary,
        resume,
        skills,
    })
}

fn term_counts(tokens: &[String]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

fn weigh(counts: &BTreeMap<String, u32>, index: &BTreeMap<&str, usize>, idf: &[f64]) -> MatchVector {
    let mut weights = vec![0.0_f64; idf.len()];
    for (term, count) in counts {
        if let Some(&i) = index.get(term.as_str()) {
            weights[i] = f64::from(*count) * idf[i];
        }
    }
    l2_normalize(&mut weights);
    MatchVector { weights }
}

fn l2_normalize(weights: &mut [f64]) {
    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in weights.iter_mut() {
            *w /= norm;
        }
    }
}
