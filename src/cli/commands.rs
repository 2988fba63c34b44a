// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Four subcommands: `ask`, `chat`, `fit` and `check`. They all
// share the BotArgs flags; every flag can also come from an
// EDUSPHERE_* environment variable.

use clap::{Args, Subcommand};

use crate::application::config::BotConfig;
use crate::ml::classifier::ClassifierConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question and print the answer
    Ask(AskArgs),

    /// Interactive session: one answer per line read from stdin
    Chat(BotArgs),

    /// Fit the model and store it in --model-dir
    Fit(BotArgs),

    /// Replay every training question and report how many reproduce their answer
    Check(BotArgs),
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct BotArgs {
    /// JSON dataset: an array of {"input": ..., "output": ...} records
    #[arg(long, env = "EDUSPHERE_DATASET", default_value = "dataset.json")]
    pub dataset: String,

    /// CSV file every answered message is appended to
    #[arg(long, env = "EDUSPHERE_LOG_FILE", default_value = "chat_log.csv")]
    pub log_file: String,

    /// Do not write the conversation log
    #[arg(long, env = "EDUSPHERE_NO_LOG")]
    pub no_log: bool,

    /// Cache the fitted model here and reuse it while the dataset is unchanged
    #[arg(long, env = "EDUSPHERE_MODEL_DIR")]
    pub model_dir: Option<String>,

    /// Gradient descent step size
    #[arg(long, env = "EDUSPHERE_LEARNING_RATE", default_value_t = 0.5)]
    pub learning_rate: f32,

    /// Maximum gradient descent passes over the dataset
    #[arg(long, env = "EDUSPHERE_MAX_ITER", default_value_t = 500)]
    pub max_iter: usize,

    /// L2 penalty on classifier weights
    #[arg(long, env = "EDUSPHERE_L2_PENALTY", default_value_t = 1e-4)]
    pub l2_penalty: f32,
}

/// Arguments for `ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(long, short)]
    pub question: String,

    #[command(flatten)]
    pub bot: BotArgs,
}

/// The boundary between Layer 1 and Layer 2: the application
/// layer only ever sees BotConfig.
impl From<BotArgs> for BotConfig {
    fn from(a: BotArgs) -> Self {
        BotConfig {
            dataset_path: a.dataset,
            log_path:     (!a.no_log).then_some(a.log_file),
            model_dir:    a.model_dir,
            classifier:   ClassifierConfig {
                learning_rate: a.learning_rate,
                max_iter:      a.max_iter,
                l2_penalty:    a.l2_penalty,
                ..ClassifierConfig::default()
            },
        }
    }
}
