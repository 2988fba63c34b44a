// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers:
//   - JsonDatasetLoader / InMemoryDataset implement DatasetSource
//   - CsvConversationLog / NullConversationLog implement
//     ConversationSink
//   - ChatBot / InferenceService implement QuestionAnswerer
//
// The application layer only talks to these traits, so a test
// can build a bot from an in-memory dataset and a recording
// sink without touching disk.

use crate::domain::errors::Result;
use crate::domain::log_entry::LogEntry;
use crate::domain::training_example::Corpus;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can produce the training corpus.
pub trait DatasetSource {
    /// Human-readable name used in errors and logs (usually a path).
    fn describe(&self) -> String;

    /// Read every record, in order.
    ///
    /// Fails with `DatasetNotFound`, `DatasetFormat` or `DatasetEmpty`.
    fn load(&self) -> Result<Corpus>;
}

// ─── ConversationSink ─────────────────────────────────────────────────────────
/// Append-only destination for answered exchanges. Never read back.
///
/// Implementations must make each `append` all-or-nothing when called
/// from several threads at once.
pub trait ConversationSink: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that maps a question to a canned answer.
///
/// There is no "don't know" outcome: some answer is always returned.
pub trait QuestionAnswerer {
    fn answer(&self, question: &str) -> String;
}
