// ============================================================
// Layer 2 — Bot Configuration
// ============================================================
// Everything needed to stand a bot up: where the dataset lives,
// where the conversation log goes, whether to cache the fitted
// model, and the classifier hyperparameters.
//
// The CLI converts its clap arguments into this struct, so the
// application layer never sees clap types. Serialisable so it
// can be dumped alongside a run for reproducibility.

use serde::{Deserialize, Serialize};

use crate::ml::classifier::ClassifierConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// JSON dataset of {input, output} records
    pub dataset_path: String,

    /// CSV conversation log; `None` disables logging
    pub log_path: Option<String>,

    /// Directory for the fitted-model cache; `None` always refits
    pub model_dir: Option<String>,

    /// Gradient descent settings for the classifier
    pub classifier: ClassifierConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            dataset_path: "dataset.json".to_string(),
            log_path:     Some("chat_log.csv".to_string()),
            model_dir:    None,
            classifier:   ClassifierConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        let cfg = BotConfig::default();
        assert_eq!(cfg.dataset_path, "dataset.json");
        assert_eq!(cfg.log_path.as_deref(), Some("chat_log.csv"));
        assert!(cfg.model_dir.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let cfg  = BotConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: BotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
