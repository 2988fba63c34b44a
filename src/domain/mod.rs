// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// bot works with. Nothing here touches files, clap or the
// learning code.
//
//   training_example.rs — one (question, answer) pair and the
//                         index-aligned Corpus built from them
//   log_entry.rs        — one row of the conversation log
//   traits.rs           — seams the other layers implement
//   errors.rs           — the library error taxonomy

/// A question/answer pair and the ordered corpus
pub mod training_example;

/// A single logged exchange
pub mod log_entry;

/// Core abstractions (traits) that other layers implement
pub mod traits;

/// `BotError` and the library `Result` alias
pub mod errors;
