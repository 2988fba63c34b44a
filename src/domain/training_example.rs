// ============================================================
// Layer 3 — TrainingExample and Corpus
// ============================================================
// A TrainingExample is one canned (question, answer) pair as it
// appears in the dataset. The Corpus keeps every example in
// dataset order as two parallel, index-aligned sequences:
//
//   inputs[i]  — the question text, verbatim
//   outputs[i] — the answer the bot should give for it
//
// Neither is ever mutated after load.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One question/answer pair. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// The question as written in the dataset
    pub input: String,

    /// The canned answer, used verbatim as the classifier label
    pub output: String,
}

impl TrainingExample {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input:  input.into(),
            output: output.into(),
        }
    }
}

/// Ordered collection of examples, stored as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    inputs:  Vec<String>,
    outputs: Vec<String>,
}

impl Corpus {
    pub fn from_examples(examples: impl IntoIterator<Item = TrainingExample>) -> Self {
        let (inputs, outputs) = examples
            .into_iter()
            .map(|ex| (ex.input, ex.output))
            .unzip();
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Iterate `(input, output)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .zip(self.outputs.iter())
            .map(|(i, o)| (i.as_str(), o.as_str()))
    }

    /// Hex SHA-256 over every record, in order.
    ///
    /// Each field is length-prefixed so ("ab", "c") and ("a", "bc")
    /// hash differently.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for (input, output) in self.iter() {
            for field in [input, output] {
                hasher.update((field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}
