// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads the fixed question/answer set into a Corpus.
//
// On-disk format (UTF-8 JSON, array of objects):
//
//   [
//     { "input": "What is gravity?", "output": "Gravity is ..." },
//     ...
//   ]
//
// Extra keys in a record are ignored. Every record must carry a
// non-blank string `input` and `output`; the first bad record
// fails the whole load with its index in the message.

use serde_json::Value;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::domain::errors::{BotError, Result};
use crate::domain::traits::DatasetSource;
use crate::domain::training_example::{Corpus, TrainingExample};

/// Loads the dataset from a JSON file.
pub struct JsonDatasetLoader {
    path: PathBuf,
}

impl JsonDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for JsonDatasetLoader {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Corpus> {
        let name = self.describe();

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BotError::DatasetNotFound(name));
            }
            // InvalidData covers non-UTF-8 content
            Err(e) => return Err(BotError::format(name, format!("cannot read file: {e}"))),
        };

        let corpus = parse_records(&name, &text)?;
        tracing::info!("Loaded {} examples from '{}'", corpus.len(), name);
        Ok(corpus)
    }
}

/// Parse a JSON document into a Corpus, validating every record.
pub fn parse_records(name: &str, text: &str) -> Result<Corpus> {
    // Editors on Windows like to prepend a BOM
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let records: Vec<Value> = serde_json::from_str(text)
        .map_err(|e| BotError::format(name, format!("expected a JSON array of records: {e}")))?;

    let examples = records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(name, index, record))
        .collect::<Result<Vec<_>>>()?;

    if examples.is_empty() {
        return Err(BotError::DatasetEmpty(name.to_string()));
    }

    Ok(Corpus::from_examples(examples))
}

fn parse_record(name: &str, index: usize, record: &Value) -> Result<TrainingExample> {
    if !record.is_object() {
        return Err(BotError::format(name, format!("record {index} is not an object")));
    }
    let input  = required_field(name, index, record, "input")?;
    let output = required_field(name, index, record, "output")?;
    Ok(TrainingExample::new(input, output))
}

fn required_field<'a>(
    name:   &str,
    index:  usize,
    record: &'a Value,
    field:  &str,
) -> Result<&'a str> {
    let value = record.get(field).ok_or_else(|| {
        BotError::format(name, format!("record {index} is missing field '{field}'"))
    })?;
    let text = value.as_str().ok_or_else(|| {
        BotError::format(name, format!("record {index} field '{field}' is not a string"))
    })?;
    if text.trim().is_empty() {
        return Err(BotError::format(
            name,
            format!("record {index} field '{field}' is empty"),
        ));
    }
    Ok(text)
}

// ─── InMemoryDataset ──────────────────────────────────────────────────────────
/// A dataset held in memory; lets tests and embedders build a bot without
/// touching disk. Applies the same validation as the file loader.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    name:     String,
    examples: Vec<TrainingExample>,
}

impl InMemoryDataset {
    pub fn new(name: impl Into<String>, examples: Vec<TrainingExample>) -> Self {
        Self {
            name: name.into(),
            examples,
        }
    }

    /// Build from `(input, output)` pairs.
    pub fn from_pairs<I, Q, A>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        let examples = pairs
            .into_iter()
            .map(|(q, a)| TrainingExample::new(q, a))
            .collect();
        Self::new(name, examples)
    }
}

impl DatasetSource for InMemoryDataset {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Corpus> {
        for (index, ex) in self.examples.iter().enumerate() {
            for (field, text) in [("input", &ex.input), ("output", &ex.output)] {
                if text.trim().is_empty() {
                    return Err(BotError::format(
                        &self.name,
                        format!("record {index} field '{field}' is empty"),
                    ));
                }
            }
        }
        if self.examples.is_empty() {
            return Err(BotError::DatasetEmpty(self.name.clone()));
        }
        Ok(Corpus::from_examples(self.examples.iter().cloned()))
    }
}
