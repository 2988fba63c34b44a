// ============================================================
// Layer 3 — LogEntry
// ============================================================
// One row of the conversation log: what the user typed (raw,
// before normalisation) and what the bot answered. Entries are
// created per request and handed straight to a sink.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// When the answer was produced (local time)
    pub timestamp: DateTime<Local>,

    /// The unnormalised user input
    pub input: String,

    /// The answer returned to the caller
    pub response: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time.
    pub fn now(input: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            input:     input.into(),
            response:  response.into(),
        }
    }
}
