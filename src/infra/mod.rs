// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns that sit beside the pipeline rather than inside it:
//
//   conversation_log.rs — append-only CSV record of every
//                         answered request (the only shared
//                         mutable state in the process)
//
//   model_store.rs      — optional on-disk cache of a fitted
//                         FeatureSpace + ClassifierModel, keyed
//                         by the dataset's content hash

/// CSV conversation log and the no-op sink
pub mod conversation_log;

/// Fitted-model persistence
pub mod model_store;
