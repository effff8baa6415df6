// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to these traits, so the
// prompt file reader and the submission writer can be swapped
// (or faked in tests) without touching the generation workflow.

use anyhow::Result;

// ─── PromptSource ─────────────────────────────────────────────────────────────
/// Any component that can supply sentence prefixes to continue.
///
/// Implementations:
///   - ContinuationLoader → one prefix per line of a text file
pub trait PromptSource {
    /// Load every prefix in source order.
    /// Each entry is one line of whitespace-separated words.
    fn load_prompts(&self) -> Result<Vec<String>>;
}

// ─── SubmissionSink ───────────────────────────────────────────────────────────
/// Any component that can persist finished continuations.
///
/// Implementations:
///   - SubmissionWriter → plain text file, one line per sentence
pub trait SubmissionSink {
    /// Write all continuations, preserving their order.
    fn write_all(&self, sentences: &[String]) -> Result<()>;
}
