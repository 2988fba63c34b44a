// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Construction-time errors (dataset + fit) are fatal and go
// back to the caller. Log-write errors only ever reach the
// observability sink; `respond` swallows them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// The dataset source does not exist.
    #[error("dataset '{0}' not found")]
    DatasetNotFound(String),

    /// The dataset exists but is not a sequence of valid records.
    #[error("dataset '{dataset}' is malformed: {reason}")]
    DatasetFormat { dataset: String, reason: String },

    /// The dataset parsed but holds no records.
    #[error("dataset '{0}' contains no examples")]
    DatasetEmpty(String),

    /// `transform` / `predict` called on a component that was never fitted.
    #[error("{0} used before fit")]
    NotFitted(&'static str),

    #[error("cannot fit a classifier on zero examples")]
    EmptyLabelSet,

    #[error("got {features} feature vectors but {labels} labels")]
    FeatureLabelMismatch { features: usize, labels: usize },

    #[error("cannot append to conversation log '{}': {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model store '{}': {reason}", .path.display())]
    ModelStore { path: PathBuf, reason: String },
}

impl BotError {
    pub(crate) fn format(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        BotError::DatasetFormat {
            dataset: dataset.into(),
            reason:  reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_dataset() {
        let err = BotError::DatasetNotFound("dataset.json".into());
        assert_eq!(err.to_string(), "dataset 'dataset.json' not found");

        let err = BotError::format("dataset.json", "record 2 is missing field 'output'");
        assert!(err.to_string().contains("record 2 is missing field 'output'"));
    }

    #[test]
    fn test_log_write_keeps_io_source() {
        use std::error::Error as _;
        let err = BotError::LogWrite {
            path:   PathBuf::from("chat_log.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(err.to_string().contains("chat_log.csv"));
        assert!(err.source().is_some());
    }
}
