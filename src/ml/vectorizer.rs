// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Fitted once over the normalised training questions:
//
//   vocabulary — token → column, in order of first appearance
//   idf[col]   — ln((1 + N) / (1 + df)) + 1
//
// where N is the number of training texts and df the number of
// texts containing the token (smoothed idf, as in scikit-learn).
//
// transform(text) = raw term counts × idf, then L2-normalised.
// Unknown tokens are ignored; a text with no known tokens maps
// to the all-zero vector.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::errors::{BotError, Result};

// ─── FeatureVector ────────────────────────────────────────────────────────────
/// Sparse feature vector: `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim:     usize,
    entries: Vec<(usize, f32)>,
}

impl FeatureVector {
    /// The all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Non-zero entries, sorted by column.
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: usize) -> f32 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn l2_norm(&self) -> f32 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt()
    }

    /// Dot product with a dense row. Columns past the end of `dense` count as 0.
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.entries
            .iter()
            .filter_map(|&(c, v)| dense.get(c).map(|w| w * v))
            .sum()
    }
}

// ─── FeatureSpace ─────────────────────────────────────────────────────────────
/// Fitted vocabulary and idf weights. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpace {
    vocabulary: BTreeMap<String, usize>,
    idf:        Vec<f32>,
}

impl FeatureSpace {
    /// Fit over already-normalised texts.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut vocabulary: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for text in texts {
            let unique: HashSet<&str> = text.as_ref().split_whitespace().collect();
            // Walk tokens in text order so column ids follow first appearance
            for token in text.as_ref().split_whitespace() {
                if !vocabulary.contains_key(token) {
                    vocabulary.insert(token.to_string(), doc_freq.len());
                    doc_freq.push(0);
                }
            }
            for token in unique {
                doc_freq[vocabulary[token]] += 1;
            }
        }

        let n = texts.len() as f32;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        tracing::debug!("Fitted vocabulary of {} tokens over {} texts", doc_freq.len(), texts.len());
        Self { vocabulary, idf }
    }

    /// Number of columns.
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    pub fn column(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }

    pub fn idf(&self, token: &str) -> Option<f32> {
        self.column(token).map(|c| self.idf[c])
    }

    /// Vectorise one normalised text.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in text.split_whitespace() {
            if let Some(col) = self.column(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= norm;
            }
        }

        FeatureVector { dim: self.dim(), entries }
    }
}

// ─── TfidfVectorizer ──────────────────────────────────────────────────────────
/// Fit-then-transform wrapper around `FeatureSpace`.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    space: Option<FeatureSpace>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self { space: None }
    }

    pub fn fit<S: AsRef<str>>(&mut self, texts: &[S]) -> &FeatureSpace {
        self.space.insert(FeatureSpace::fit(texts))
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, texts: &[S]) -> Vec<FeatureVector> {
        let space = self.fit(texts);
        texts.iter().map(|t| space.transform(t.as_ref())).collect()
    }

    /// Fails with `NotFitted` before `fit`.
    pub fn transform(&self, text: &str) -> Result<FeatureVector> {
        self.space()
            .map(|space| space.transform(text))
    }

    pub fn space(&self) -> Result<&FeatureSpace> {
        self.space.as_ref().ok_or(BotError::NotFitted("vectorizer"))
    }

    pub fn into_space(self) -> Result<FeatureSpace> {
        self.space.ok_or(BotError::NotFitted("vectorizer"))
    }
}
