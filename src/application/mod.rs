// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers; no learning math, no printing
// and no clap types live here.
//
//   config.rs            — BotConfig (what the CLI hands over)
//   chat_bot.rs          — the fitted, immutable bot value
//   build_use_case.rs    — dataset → (cached or fresh) ChatBot
//   inference_service.rs — per-request answer + conversation log
//   check_use_case.rs    — replay the corpus as a fit sanity check

/// Runtime configuration
pub mod config;

/// Corpus + FeatureSpace + ClassifierModel as one value
pub mod chat_bot;

/// Startup workflow
pub mod build_use_case;

/// Request workflow
pub mod inference_service;

/// Training-set replay
pub mod check_use_case;
