// ============================================================
// Layer 6 — Conversation Log
// ============================================================
// Append-only CSV record of every answered request.
//
// Output file (default: chat_log.csv):
//   Timestamp,User Input,Chatbot Response
//   2026-10-17 09:14:03,what is gravity,Gravity is the force ...
//
// The header row is written on the first append when the file
// is missing or empty. Fields are CSV-quoted, so commas, quotes
// and newlines in user input stay inside their cell.
//
// Concurrency: appends take a process-wide lock for this log and
// each row is encoded in memory first, then written with one
// write_all, so concurrent callers never interleave rows.

use parking_lot::Mutex;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::domain::errors::{BotError, Result};
use crate::domain::log_entry::LogEntry;
use crate::domain::traits::ConversationSink;

/// Column names, in order.
pub const HEADER: [&str; 3] = ["Timestamp", "User Input", "Chatbot Response"];

/// Timestamp column format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV-backed conversation log.
pub struct CsvConversationLog {
    /// Full path to the CSV file
    path: PathBuf,

    /// Serialises appends from concurrent `respond` calls
    lock: Mutex<()>,
}

impl CsvConversationLog {
    /// Nothing touches disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> BotError {
        BotError::LogWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConversationSink for CsvConversationLog {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let _guard = self.lock.lock();

        let needs_header = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);
        let row = encode_row(entry, needs_header).map_err(|e| self.write_error(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(&row).map_err(|e| self.write_error(e))?;

        tracing::debug!("Logged exchange to '{}'", self.path.display());
        Ok(())
    }
}

/// Encode one entry (optionally preceded by the header) as CSV bytes.
fn encode_row(entry: &LogEntry, with_header: bool) -> io::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if with_header {
        writer.write_record(HEADER)?;
    }
    let timestamp = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
    writer.write_record([timestamp.as_str(), entry.input.as_str(), entry.response.as_str()])?;
    writer.into_inner().map_err(|e| e.into_error())
}

// ─── NullConversationLog ──────────────────────────────────────────────────────
/// Discards every entry; used when logging is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConversationLog;

impl ConversationSink for NullConversationLog {
    fn append(&self, _entry: &LogEntry) -> Result<()> {
        Ok(())
    }
}
