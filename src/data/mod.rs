// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the dataset file and the plain strings the
// vectorizer is fitted on:
//
//   dataset.json
//       │
//       ▼
//   JsonDatasetLoader → validated Corpus (inputs / outputs)
//       │
//       ▼
//   TextNormalizer    → lowercase, strip punctuation, drop stopwords
//       │
//       ▼
//   ml::vectorizer    (Layer 5)

/// Reads and validates the question/answer dataset
pub mod loader;

/// Canonicalises raw text before vectorisation
pub mod normalizer;

/// Static English stopword set
pub mod stopwords;
