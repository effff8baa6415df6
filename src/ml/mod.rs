// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All tensor-level code lives in this layer.
//
//   model.rs    — The recurrent language model
//                 • Word embeddings
//                 • Single LSTM layer
//                 • Optional down-projection
//                 • Vocabulary logits
//
//   decoder.rs  — Batched greedy decoding
//                 Steps the model column by column over the
//                 token buffer and fills placeholder slots
//                 with argmax predictions
//
// Reference: Burn Book §3 (Building Blocks)
//            Hochreiter & Schmidhuber (1997) LSTM

/// LSTM language model architecture
pub mod model;

/// Greedy decode loop over batch token buffers
pub mod decoder;
