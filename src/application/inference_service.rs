// ============================================================
// Layer 2 — Inference Service
// ============================================================
// The request path. For each call:
//
//   raw input → ChatBot::answer (normalise → vectorise → classify)
//             → one LogEntry appended to the conversation sink
//             → answer returned
//
// The answer is returned even when the append fails; the failure
// is reported through tracing and nowhere else. Model state is
// shared read-only via Arc, so the service is cheap to clone into
// worker threads.

use std::sync::Arc;

use crate::application::chat_bot::ChatBot;
use crate::domain::log_entry::LogEntry;
use crate::domain::traits::{ConversationSink, QuestionAnswerer};
use crate::infra::conversation_log::NullConversationLog;

#[derive(Clone)]
pub struct InferenceService {
    bot: Arc<ChatBot>,
    log: Arc<dyn ConversationSink>,
}

impl InferenceService {
    pub fn new(bot: Arc<ChatBot>, log: Arc<dyn ConversationSink>) -> Self {
        Self { bot, log }
    }

    /// A service that answers without recording anything.
    pub fn without_log(bot: Arc<ChatBot>) -> Self {
        Self::new(bot, Arc::new(NullConversationLog))
    }

    /// Answer `raw_input` and record the exchange. Never fails.
    pub fn respond(&self, raw_input: &str) -> String {
        let answer = self.bot.answer(raw_input).to_string();

        let entry = LogEntry::now(raw_input, answer.as_str());
        if let Err(e) = self.log.append(&entry) {
            tracing::warn!("Conversation not logged: {e}");
        }

        answer
    }

    /// Entry point for the presentation layer; same as `respond`.
    pub fn get_bot_response(&self, user_input: &str) -> String {
        self.respond(user_input)
    }

    pub fn bot(&self) -> &ChatBot {
        &self.bot
    }
}

impl QuestionAnswerer for InferenceService {
    fn answer(&self, question: &str) -> String {
        self.respond(question)
    }
}
