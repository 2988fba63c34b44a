// ============================================================
// Layer 2 — ChatBot
// ============================================================
// The fitted bot as one immutable value: the Corpus it was
// trained on, the TF-IDF FeatureSpace and the ClassifierModel.
// All three are built together here and never change after.
//
// ChatBot is Send + Sync; share it across threads with Arc.
// There is no retrain or incremental update: build a new one.

use crate::data::normalizer::TextNormalizer;
use crate::domain::errors::Result;
use crate::domain::traits::{DatasetSource, QuestionAnswerer};
use crate::domain::training_example::Corpus;
use crate::ml::classifier::{ClassifierConfig, ClassifierModel, LogisticClassifier};
use crate::ml::vectorizer::{FeatureSpace, TfidfVectorizer};

#[derive(Debug, Clone)]
pub struct ChatBot {
    corpus:     Corpus,
    normalizer: TextNormalizer,
    space:      FeatureSpace,
    model:      ClassifierModel,
}

impl ChatBot {
    /// Load `source` and fit on it.
    pub fn from_source(source: &dyn DatasetSource, config: &ClassifierConfig) -> Result<Self> {
        let corpus = source.load()?;
        Self::fit(corpus, config)
    }

    /// Fit vectorizer and classifier over `corpus`.
    pub fn fit(corpus: Corpus, config: &ClassifierConfig) -> Result<Self> {
        let normalizer = TextNormalizer::new();

        // ── Step 1: Normalise every training question ────────────────────────
        let normalized: Vec<String> = corpus
            .inputs()
            .iter()
            .map(|q| normalizer.normalize(q))
            .collect();

        // ── Step 2: Fit TF-IDF and vectorise the questions ───────────────────
        let mut vectorizer = TfidfVectorizer::new();
        let features = vectorizer.fit_transform(&normalized);

        // ── Step 3: Fit the classifier, one class per distinct answer ────────
        let mut classifier = LogisticClassifier::new(*config);
        classifier.fit(&features, corpus.outputs())?;

        let space = vectorizer.into_space()?;
        let model = classifier.into_model()?;
        tracing::info!(
            "Fitted bot: {} examples, {} vocabulary terms, {} distinct answers",
            corpus.len(),
            space.dim(),
            model.labels().len()
        );

        Ok(Self { corpus, normalizer, space, model })
    }

    /// Reassemble a bot from a previously fitted space and model.
    pub fn from_parts(corpus: Corpus, space: FeatureSpace, model: ClassifierModel) -> Self {
        Self {
            corpus,
            normalizer: TextNormalizer::new(),
            space,
            model,
        }
    }

    /// normalise → vectorise → classify. Pure; always returns a label.
    pub fn answer(&self, raw_input: &str) -> &str {
        let normalized = self.normalizer.normalize(raw_input);
        let features   = self.space.transform(&normalized);
        if features.is_zero() {
            tracing::debug!("No known terms in input; answering from intercepts alone");
        }
        self.model.predict(&features)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn feature_space(&self) -> &FeatureSpace {
        &self.space
    }

    pub fn model(&self) -> &ClassifierModel {
        &self.model
    }
}

impl QuestionAnswerer for ChatBot {
    fn answer(&self, question: &str) -> String {
        ChatBot::answer(self, question).to_string()
    }
}
