// ============================================================
// Layer 5 — Multinomial Logistic Regression Classifier
// ============================================================
// Maps a TF-IDF feature vector to one of the distinct answer
// labels seen in training.
//
// Model, for K labels over D features:
//   score_k(x) = w_k · x + b_k
//   p(k | x)   = softmax(score)_k
//
// Fitting minimises mean cross-entropy + (λ/2)·‖W‖² with plain
// full-batch gradient descent from all-zero weights:
//   ∂/∂w_k = mean_i (p_ik − y_ik) · x_i + λ·w_k
//   ∂/∂b_k = mean_i (p_ik − y_ik)
// No randomness is involved, so the same corpus and config
// always give the same model.
//
// With one example per label (the usual Q&A dataset) this acts
// as a similarity lookup: each w_k drifts toward its own
// question's vector. `predict` always returns some label; there
// is no "don't know" class and no confidence threshold.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::errors::{BotError, Result};
use crate::ml::vectorizer::FeatureVector;

/// Gradient descent hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Step size; features are unit-length, so 0.5 stays stable
    pub learning_rate: f32,

    /// Upper bound on full-batch passes
    pub max_iter: usize,

    /// L2 penalty λ on the weights (not the intercepts)
    pub l2_penalty: f32,

    /// Stop once every gradient component is below this
    pub tolerance: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            max_iter:      500,
            l2_penalty:    1e-4,
            tolerance:     1e-6,
        }
    }
}

// ─── ClassifierModel ──────────────────────────────────────────────────────────
/// Fitted weights. `labels` is sorted; row `k` of `weights` belongs to
/// `labels[k]`.
///
/// Deserialising re-checks the shape, so a tampered file is rejected
/// instead of panicking later in `predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct ClassifierModel {
    labels:     Vec<String>,
    weights:    Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

#[derive(Deserialize)]
struct RawModel {
    labels:     Vec<String>,
    weights:    Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl TryFrom<RawModel> for ClassifierModel {
    type Error = String;

    fn try_from(raw: RawModel) -> std::result::Result<Self, String> {
        let k = raw.labels.len();
        if k == 0 {
            return Err("model has no labels".to_string());
        }
        if raw.weights.len() != k || raw.intercepts.len() != k {
            return Err(format!(
                "model has {} labels but {} weight rows and {} intercepts",
                k,
                raw.weights.len(),
                raw.intercepts.len()
            ));
        }
        if !raw.labels.windows(2).all(|w| w[0] < w[1]) {
            return Err("model labels are not sorted and distinct".to_string());
        }
        let dim = raw.weights[0].len();
        if raw.weights.iter().any(|row| row.len() != dim) {
            return Err("model weight rows differ in length".to_string());
        }
        Ok(Self {
            labels:     raw.labels,
            weights:    raw.weights,
            intercepts: raw.intercepts,
        })
    }
}

impl ClassifierModel {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Feature dimension the model was fitted on.
    pub fn n_features(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    /// Raw linear score per label.
    pub fn scores(&self, x: &FeatureVector) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| x.dot(row) + b)
            .collect()
    }

    /// Softmax over `scores`; sums to 1.
    pub fn probabilities(&self, x: &FeatureVector) -> Vec<f32> {
        softmax(&self.scores(x))
    }

    /// The single best label. Ties go to the earliest (smallest) label.
    pub fn predict(&self, x: &FeatureVector) -> &str {
        let best = argmax(&self.scores(x));
        &self.labels[best]
    }
}

// ─── LogisticClassifier ───────────────────────────────────────────────────────
/// Fit-then-predict wrapper around `ClassifierModel`.
#[derive(Debug, Clone, Default)]
pub struct LogisticClassifier {
    config: ClassifierConfig,
    model:  Option<ClassifierModel>,
}

impl LogisticClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config, model: None }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Fit on index-aligned features and labels.
    ///
    /// Fails with `EmptyLabelSet` when there are no examples and
    /// `FeatureLabelMismatch` when the two slices differ in length.
    pub fn fit<L: AsRef<str>>(
        &mut self,
        features: &[FeatureVector],
        labels:   &[L],
    ) -> Result<&ClassifierModel> {
        if features.len() != labels.len() {
            return Err(BotError::FeatureLabelMismatch {
                features: features.len(),
                labels:   labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(BotError::EmptyLabelSet);
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let index: BTreeMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let targets: Vec<usize> = labels.iter().map(|l| index[l.as_ref()]).collect();
        let n_features = features.iter().map(FeatureVector::dim).max().unwrap_or(0);

        let model = fit_gradient_descent(&self.config, features, &targets, classes, n_features);
        Ok(self.model.insert(model))
    }

    /// Fails with `NotFitted` before `fit`.
    pub fn predict(&self, x: &FeatureVector) -> Result<&str> {
        self.model().map(|m| m.predict(x))
    }

    pub fn model(&self) -> Result<&ClassifierModel> {
        self.model.as_ref().ok_or(BotError::NotFitted("classifier"))
    }

    pub fn into_model(self) -> Result<ClassifierModel> {
        self.model.ok_or(BotError::NotFitted("classifier"))
    }
}

fn fit_gradient_descent(
    cfg:        &ClassifierConfig,
    features:   &[FeatureVector],
    targets:    &[usize],
    labels:     Vec<String>,
    n_features: usize,
) -> ClassifierModel {
    let k = labels.len();
    let mut model = ClassifierModel {
        labels,
        weights:    vec![vec![0.0; n_features]; k],
        intercepts: vec![0.0; k],
    };

    // One label: every score is 0 and predict always returns it
    if k == 1 {
        tracing::debug!("Single label in training data; skipping gradient descent");
        return model;
    }

    let n = features.len() as f32;
    let mut w_grad = vec![vec![0.0f32; n_features]; k];
    let mut b_grad = vec![0.0f32; k];

    for iter in 0..cfg.max_iter {
        w_grad.iter_mut().for_each(|row| row.fill(0.0));
        b_grad.fill(0.0);

        // ── Accumulate data gradient (sparse in x) ───────────────────────────
        for (x, &y) in features.iter().zip(targets) {
            let probs = model.probabilities(x);
            for (class, p) in probs.iter().enumerate() {
                let err = if class == y { p - 1.0 } else { *p };
                b_grad[class] += err;
                for &(col, v) in x.entries() {
                    w_grad[class][col] += err * v;
                }
            }
        }

        // ── Step ─────────────────────────────────────────────────────────────
        let mut max_grad = 0.0f32;
        for class in 0..k {
            let row = &mut model.weights[class];
            for (w, g) in row.iter_mut().zip(&w_grad[class]) {
                let g = g / n + cfg.l2_penalty * *w;
                *w -= cfg.learning_rate * g;
                max_grad = max_grad.max(g.abs());
            }
            let g = b_grad[class] / n;
            model.intercepts[class] -= cfg.learning_rate * g;
            max_grad = max_grad.max(g.abs());
        }

        if max_grad < cfg.tolerance {
            tracing::debug!("Gradient descent converged after {} iterations", iter + 1);
            break;
        }
    }

    tracing::debug!("Fitted {} labels over {} features", k, n_features);
    model
}

fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, best_v), (i, &v)| {
            if v > best_v { (i, v) } else { (best, best_v) }
        })
        .0
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
