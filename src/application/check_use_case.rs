// ============================================================
// Layer 2 — CheckUseCase
// ============================================================
// Fit sanity check: replay every training question through the
// bot and count how many come back with their own answer. With
// unique answers and distinct questions this should be 100%.
//
// Misses usually mean two questions normalise to the same text
// (e.g. differ only in stopwords or punctuation) but carry
// different answers.

use crate::application::chat_bot::ChatBot;

/// A training question that did not reproduce its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Miss {
    pub question: String,
    pub expected: String,
    pub got:      String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub total:      usize,
    pub reproduced: usize,
    pub misses:     Vec<Miss>,
}

impl CheckReport {
    /// Fraction reproduced, in [0.0, 1.0].
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.reproduced as f64 / self.total as f64
    }

    pub fn is_clean(&self) -> bool {
        self.misses.is_empty()
    }
}

pub struct CheckUseCase<'a> {
    bot: &'a ChatBot,
}

impl<'a> CheckUseCase<'a> {
    pub fn new(bot: &'a ChatBot) -> Self {
        Self { bot }
    }

    /// Replay the corpus. Does not touch the conversation log.
    pub fn execute(&self) -> CheckReport {
        let mut misses = Vec::new();
        for (question, expected) in self.bot.corpus().iter() {
            let got = self.bot.answer(question);
            if got != expected {
                tracing::debug!("Miss: {:?} → {:?} (expected {:?})", question, got, expected);
                misses.push(Miss {
                    question: question.to_string(),
                    expected: expected.to_string(),
                    got:      got.to_string(),
                });
            }
        }

        let total = self.bot.corpus().len();
        let report = CheckReport {
            total,
            reproduced: total - misses.len(),
            misses,
        };
        tracing::info!(
            "Reproduced {}/{} training answers ({:.1}%)",
            report.reproduced,
            report.total,
            report.accuracy() * 100.0
        );
        report
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::InMemoryDataset;
    use crate::ml::classifier::ClassifierConfig;

    fn build(pairs: &[(&str, &str)]) -> ChatBot {
        let source = InMemoryDataset::from_pairs("mem", pairs.iter().copied());
        ChatBot::from_source(&source, &ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_clean_dataset_reproduces_everything() {
        let bot = build(&[
            ("What is gravity?", "A force."),
            ("What is light?", "Radiation."),
            ("Who discovered penicillin?", "Fleming."),
        ]);
        let report = CheckUseCase::new(&bot).execute();
        assert!(report.is_clean());
        assert_eq!(report.reproduced, 3);
        assert_eq!(report.accuracy(), 1.0);
    }

    #[test]
    fn test_indistinguishable_questions_are_reported() {
        // Both normalise to "gravity"
        let bot = build(&[("What is gravity?", "A force."), ("Gravity!", "Newton's idea.")]);
        let report = CheckUseCase::new(&bot).execute();
        assert_eq!(report.total, 2);
        assert_eq!(report.misses.len(), 1);
        assert_eq!(report.reproduced, 1);
    }

    #[test]
    fn test_empty_report_accuracy() {
        let report = CheckReport { total: 0, reproduced: 0, misses: Vec::new() };
        assert_eq!(report.accuracy(), 1.0);
    }
}
