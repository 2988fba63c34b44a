// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists a fitted FeatureSpace + ClassifierModel so a restart
// can skip refitting when nothing changed.
//
// What gets saved (one pretty-printed JSON file):
//   {dir}/model.json
//     format_version — bumped when the layout changes
//     dataset_hash   — Corpus::content_hash() at fit time
//     config         — ClassifierConfig used for the fit
//     space          — vocabulary + idf weights
//     model          — labels, weights, intercepts
//
// A stored fit is only reused when the dataset hash and the
// config both match the current run.

use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::PathBuf};

use crate::domain::errors::{BotError, Result};
use crate::ml::classifier::{ClassifierConfig, ClassifierModel};
use crate::ml::vectorizer::FeatureSpace;

const FORMAT_VERSION: u32 = 1;
const MODEL_FILE: &str = "model.json";

#[derive(Serialize, Deserialize)]
struct StoredModel {
    format_version: u32,
    dataset_hash:   String,
    config:         ClassifierConfig,
    space:          FeatureSpace,
    model:          ClassifierModel,
}

/// Saves and loads fitted models under one directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the model file.
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Write the fit to `{dir}/model.json`, creating `dir` if needed.
    pub fn save(
        &self,
        dataset_hash: &str,
        config:       &ClassifierConfig,
        space:        &FeatureSpace,
        model:        &ClassifierModel,
    ) -> Result<()> {
        let path = self.model_path();

        fs::create_dir_all(&self.dir).map_err(|e| self.error(format!("cannot create directory: {e}")))?;

        let stored = StoredModel {
            format_version: FORMAT_VERSION,
            dataset_hash:   dataset_hash.to_string(),
            config:         *config,
            space:          space.clone(),
            model:          model.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| self.error(format!("cannot serialise model: {e}")))?;

        // Write-then-rename so a crash never leaves a half-written model.json
        let tmp = self.dir.join(format!("{MODEL_FILE}.tmp"));
        fs::write(&tmp, json).map_err(|e| self.error(format!("cannot write: {e}")))?;
        fs::rename(&tmp, &path).map_err(|e| self.error(format!("cannot replace: {e}")))?;

        tracing::info!("Saved fitted model to '{}'", path.display());
        Ok(())
    }

    /// Load the stored fit if it was made from the same dataset and config.
    ///
    /// `Ok(None)` when there is no file or it is stale; `Err` when the file
    /// exists but cannot be read or parsed.
    pub fn load_fresh(
        &self,
        dataset_hash: &str,
        config:       &ClassifierConfig,
    ) -> Result<Option<(FeatureSpace, ClassifierModel)>> {
        let path = self.model_path();

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No stored model at '{}'", path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.error(format!("cannot read: {e}"))),
        };

        let stored: StoredModel = serde_json::from_str(&json)
            .map_err(|e| self.error(format!("cannot parse: {e}")))?;

        if stored.model.n_features() != stored.space.dim() {
            return Err(self.error(format!(
                "model has {} feature columns but the vocabulary has {}",
                stored.model.n_features(),
                stored.space.dim()
            )));
        }

        if stored.format_version != FORMAT_VERSION {
            tracing::info!(
                "Stored model has format {} (expected {}); refitting",
                stored.format_version,
                FORMAT_VERSION
            );
            return Ok(None);
        }
        if stored.dataset_hash != dataset_hash {
            tracing::info!("Dataset changed since the stored fit; refitting");
            return Ok(None);
        }
        if stored.config != *config {
            tracing::info!("Classifier settings changed since the stored fit; refitting");
            return Ok(None);
        }

        tracing::info!("Loaded fitted model from '{}'", path.display());
        Ok(Some((stored.space, stored.model)))
    }

    fn error(&self, reason: String) -> BotError {
        BotError::ModelStore {
            path: self.model_path(),
            reason,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::LogisticClassifier;

    fn fitted() -> (FeatureSpace, ClassifierModel) {
        let texts = ["photosynthesis", "gravity"];
        let space = FeatureSpace::fit(&texts);
        let features: Vec<_> = texts.iter().map(|t| space.transform(t)).collect();
        let mut clf = LogisticClassifier::new(ClassifierConfig::default());
        clf.fit(&features, &["plants", "force"]).unwrap();
        (space, clf.into_model().unwrap())
    }

    #[test]
    fn test_round_trip_predicts_the_same() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let cfg = ClassifierConfig::default();
        let (space, model) = fitted();

        store.save("abc", &cfg, &space, &model).unwrap();
        let (space2, model2) = store.load_fresh("abc", &cfg).unwrap().unwrap();

        for q in ["photosynthesis", "gravity", "", "unknown words"] {
            assert_eq!(
                model.predict(&space.transform(q)),
                model2.predict(&space2.transform(q))
            );
        }
        assert_eq!(space, space2);
    }

    #[test]
    fn test_stale_hash_or_config_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let cfg = ClassifierConfig::default();
        let (space, model) = fitted();
        store.save("abc", &cfg, &space, &model).unwrap();

        assert!(store.load_fresh("other", &cfg).unwrap().is_none());

        let changed = ClassifierConfig { max_iter: 7, ..cfg };
        assert!(store.load_fresh("abc", &changed).unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("not-yet"));
        assert!(store
            .load_fresh("abc", &ClassifierConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        fs::write(store.model_path(), "{ not json").unwrap();
        let err = store
            .load_fresh("abc", &ClassifierConfig::default())
            .unwrap_err();
        assert!(matches!(err, BotError::ModelStore { .. }));
    }

    fn tamper(store: &ModelStore, edit: impl FnOnce(&mut serde_json::Value)) {
        let text = fs::read_to_string(store.model_path()).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&text).unwrap();
        edit(&mut json);
        fs::write(store.model_path(), json.to_string()).unwrap();
    }

    #[test]
    fn test_inconsistent_model_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let cfg = ClassifierConfig::default();
        let (space, model) = fitted();

        store.save("abc", &cfg, &space, &model).unwrap();
        tamper(&store, |json| json["model"]["labels"] = serde_json::json!([]));
        let err = store.load_fresh("abc", &cfg).unwrap_err();
        assert!(matches!(err, BotError::ModelStore { .. }));

        store.save("abc", &cfg, &space, &model).unwrap();
        tamper(&store, |json| {
            json["model"]["weights"] = serde_json::json!([[0.0], [0.0]]);
        });
        let err = store.load_fresh("abc", &cfg).unwrap_err();
        assert!(matches!(err, BotError::ModelStore { .. }));
    }
}
