// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works with: a word vocabulary, sentence prefixes, and the
// continuations the model produces for them.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Everything here is unit-testable without a GPU.

// Word <-> index lookup with the reserved special tokens
pub mod vocabulary;

// Truncation of decoded rows and rendering back to words
pub mod continuation;

// Core abstractions (traits) that other layers implement
pub mod traits;
