// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Turns raw user or dataset text into the canonical string the
// vectorizer sees. Steps, in order:
//
//   1. Lowercase (full Unicode mapping)
//   2. Drop every char that is not a letter, digit or whitespace
//   3. Split on whitespace
//   4. Drop stopwords
//   5. Rejoin survivors with single spaces, order preserved
//
// Output depends only on the input and the static stopword
// list. The empty string is a valid result.

use crate::data::stopwords;

/// Stateless normaliser shared by fit and inference.
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalise `raw` into space-separated content tokens.
    pub fn normalize(&self, raw: &str) -> String {
        // ── Steps 1–2: lowercase, then keep alphanumerics and whitespace ─────
        // Lowercasing first so any non-alphanumeric marks it emits
        // (e.g. the combining dot from 'İ') are filtered too.
        let cleaned: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        // ── Steps 3–5: tokenise, drop stopwords, rejoin ──────────────────────
        cleaned
            .split_whitespace()
            .filter(|token| !stopwords::is_stopword(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for `TextNormalizer::new().normalize(raw)`.
pub fn normalize(raw: &str) -> String {
    TextNormalizer.normalize(raw)
}
