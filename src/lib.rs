//! Edusphere Q&A bot core.
//!
//! Given free-text input, returns the closest canned answer from a fixed set
//! of question/answer pairs. The pipeline is
//! normalize → TF-IDF vectorize → multinomial logistic regression, fitted once
//! at construction and read-only afterwards.
//!
//! ```no_run
//! use std::sync::Arc;
//! use edusphere_bot::{ChatBot, InferenceService};
//! use edusphere_bot::data::loader::JsonDatasetLoader;
//! use edusphere_bot::infra::conversation_log::CsvConversationLog;
//! use edusphere_bot::ml::classifier::ClassifierConfig;
//!
//! let loader = JsonDatasetLoader::new("dataset.json");
//! let bot = ChatBot::from_source(&loader, &ClassifierConfig::default())?;
//! let service = InferenceService::new(
//!     Arc::new(bot),
//!     Arc::new(CsvConversationLog::new("chat_log.csv")),
//! );
//! println!("{}", service.get_bot_response("what is gravity?"));
//! # Ok::<(), edusphere_bot::BotError>(())
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;

pub use application::chat_bot::ChatBot;
pub use application::inference_service::InferenceService;
pub use domain::errors::{BotError, Result};
