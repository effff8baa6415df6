// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the continuation file on disk and the
// token buffers the decoder runs over:
//
//   sentences.continuation
//       │
//       ▼
//   ContinuationLoader   → reads one prefix per line
//       │
//       ▼
//   Preprocessor         → strips invisible characters
//       │
//       ▼
//   ContinuationDataset  → <bos> + word ids + <pad> rows
//       │
//       ▼
//   ContinuationBatcher  → stacks rows into [batch, width]
//       │
//       ▼
//   DataLoader           → feeds batches to the decoder, in file order
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the continuation file
pub mod loader;

/// Cleans a single prefix line
pub mod preprocessor;

/// Implements Burn's Dataset trait for encoded prefixes
pub mod dataset;

/// Implements Burn's Batcher trait to create token buffers
pub mod batcher;
