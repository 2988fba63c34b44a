// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Stands a ChatBot up from a BotConfig, in order:
//
//   Step 1: Load the dataset             (Layer 4 - data)
//   Step 2: Reuse a cached fit if fresh  (Layer 6 - infra)
//   Step 3: Otherwise fit from scratch   (Layer 5 - ml)
//   Step 4: Save the new fit             (Layer 6 - infra)
//
// Dataset errors abort the build: the bot cannot serve without a
// model. Model store problems never do; they are logged and the
// bot is refitted instead.

use anyhow::{Context, Result};
use std::collections::BTreeSet;

use crate::application::chat_bot::ChatBot;
use crate::application::config::BotConfig;
use crate::data::loader::JsonDatasetLoader;
use crate::domain::traits::DatasetSource;
use crate::domain::training_example::Corpus;
use crate::infra::model_store::ModelStore;

pub struct BuildUseCase {
    config:      BotConfig,
    force_refit: bool,
}

impl BuildUseCase {
    pub fn new(config: BotConfig) -> Self {
        Self { config, force_refit: false }
    }

    /// Ignore any cached fit and always refit (the cache is still updated).
    pub fn force_refit(mut self) -> Self {
        self.force_refit = true;
        self
    }

    /// Build the bot from the configured dataset file.
    pub fn execute(&self) -> Result<ChatBot> {
        let loader = JsonDatasetLoader::new(&self.config.dataset_path);
        self.execute_with(&loader)
    }

    /// Build the bot from any dataset source.
    pub fn execute_with(&self, source: &dyn DatasetSource) -> Result<ChatBot> {
        let cfg = &self.config;

        // ── Step 1: Load the Q&A pairs ───────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", source.describe());
        let corpus = source
            .load()
            .with_context(|| format!("cannot load dataset '{}'", source.describe()))?;

        let store = cfg.model_dir.as_deref().map(ModelStore::new);
        let hash  = corpus.content_hash();

        // ── Step 2: Reuse a stored fit when dataset and settings match ───────
        if let (Some(store), false) = (&store, self.force_refit) {
            match store.load_fresh(&hash, &cfg.classifier) {
                Ok(Some((space, model))) if labels_match(&corpus, model.labels()) => {
                    return Ok(ChatBot::from_parts(corpus, space, model));
                }
                Ok(Some(_)) => {
                    tracing::warn!("Stored model answers do not match the dataset; refitting");
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Ignoring stored model: {e}"),
            }
        }

        // ── Step 3: Fit vectorizer + classifier ──────────────────────────────
        let bot = ChatBot::fit(corpus, &cfg.classifier)
            .context("cannot fit the bot on the dataset")?;

        // ── Step 4: Persist the fit for the next start ───────────────────────
        if let Some(store) = &store {
            if let Err(e) = store.save(&hash, &cfg.classifier, bot.feature_space(), bot.model()) {
                tracing::warn!("Could not save fitted model: {e}");
            }
        }

        Ok(bot)
    }
}

/// The stored labels must be exactly the corpus's distinct answers, sorted.
fn labels_match(corpus: &Corpus, labels: &[String]) -> bool {
    let expected: BTreeSet<&str> = corpus.outputs().iter().map(String::as_str).collect();
    expected.len() == labels.len() && expected.iter().zip(labels).all(|(e, l)| *e == l.as_str())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::InMemoryDataset;
    use crate::domain::errors::BotError;

    fn config_with_store(dir: &std::path::Path) -> BotConfig {
        BotConfig {
            model_dir: Some(dir.display().to_string()),
            ..BotConfig::default()
        }
    }

    fn dataset() -> InMemoryDataset {
        InMemoryDataset::from_pairs(
            "mem",
            [("What is rain?", "Water falling."), ("What is snow?", "Frozen rain.")],
        )
    }

    #[test]
    fn test_missing_dataset_keeps_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BotConfig {
            dataset_path: dir.path().join("missing.json").display().to_string(),
            ..BotConfig::default()
        };
        let err = BuildUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BotError>(),
            Some(BotError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_writes_and_reuses_model_store() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_with_store(dir.path());

        let first = BuildUseCase::new(cfg.clone()).execute_with(&dataset()).unwrap();
        assert!(ModelStore::new(dir.path()).model_path().exists());

        let second = BuildUseCase::new(cfg).execute_with(&dataset()).unwrap();
        assert_eq!(first.answer("snow"), second.answer("snow"));
        assert_eq!(second.answer("rain falling"), "Water falling.");
    }

    #[test]
    fn test_corrupt_store_falls_back_to_refit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(ModelStore::new(dir.path()).model_path(), "garbage").unwrap();

        let bot = BuildUseCase::new(config_with_store(dir.path()))
            .execute_with(&dataset())
            .unwrap();
        assert_eq!(bot.answer("snow"), "Frozen rain.");
    }

    fn rewrite_labels(dir: &std::path::Path, labels: serde_json::Value) {
        let path = ModelStore::new(dir).model_path();
        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        json["model"]["labels"] = labels;
        std::fs::write(&path, json.to_string()).unwrap();
    }

    #[test]
    fn test_stored_model_without_labels_is_refitted() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_with_store(dir.path());
        BuildUseCase::new(cfg.clone()).execute_with(&dataset()).unwrap();
        rewrite_labels(dir.path(), serde_json::json!([]));

        let bot = BuildUseCase::new(cfg).execute_with(&dataset()).unwrap();
        assert_eq!(bot.answer("rain"), "Water falling.");
        assert_eq!(bot.answer("snow"), "Frozen rain.");
    }

    #[test]
    fn test_stored_labels_foreign_to_dataset_are_refitted() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_with_store(dir.path());
        BuildUseCase::new(cfg.clone()).execute_with(&dataset()).unwrap();
        rewrite_labels(dir.path(), serde_json::json!(["Alpha.", "Beta."]));

        let bot = BuildUseCase::new(cfg).execute_with(&dataset()).unwrap();
        assert_eq!(bot.model().labels(), ["Frozen rain.", "Water falling."]);
        assert_eq!(bot.answer("snow"), "Frozen rain.");
    }

    #[test]
    fn test_changed_dataset_is_refitted() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_with_store(dir.path());
        BuildUseCase::new(cfg.clone()).execute_with(&dataset()).unwrap();

        let changed = InMemoryDataset::from_pairs(
            "mem",
            [("What is hail?", "Ice pellets."), ("What is fog?", "Low cloud.")],
        );
        let bot = BuildUseCase::new(cfg).execute_with(&changed).unwrap();
        assert_eq!(bot.answer("hail"), "Ice pellets.");
    }
}
