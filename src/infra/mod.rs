// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem on behalf of the
// other layers:
//
//   checkpoint.rs   — Loading the pre-trained model
//                     Reads model_config.json to rebuild the
//                     architecture, then restores the weights
//                     with Burn's CompactRecorder.
//
//   vocab_store.rs  — Loading the supplied vocabulary, either a
//                     plain word list or a tokenizer.json.
//
//   submission.rs   — Writing the continuations file.
//
//   metrics.rs      — Per-run generation counts, logged at the end.
//
// Reference: Burn Book §5 (Records)
//            Rust Book §9 (Error Handling with anyhow)

/// Pre-trained model loading
pub mod checkpoint;

/// Vocabulary loading
pub mod vocab_store;

/// Submission file writer
pub mod submission;

/// Generation run metrics
pub mod metrics;
