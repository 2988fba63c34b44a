// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// The two learned components. Both follow the same shape:
// a `fit` step that produces an immutable, serialisable model
// value, and a wrapper that refuses to transform/predict until
// it has been fitted.
//
//   vectorizer.rs — TF-IDF FeatureSpace over normalised text
//   classifier.rs — softmax logistic regression over the
//                   FeatureSpace, one class per distinct answer

/// TF-IDF vocabulary, idf weights and sparse feature vectors
pub mod vectorizer;

/// Multinomial logistic regression over feature vectors
pub mod classifier;
