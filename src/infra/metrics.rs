// ============================================================
// Layer 6 — Generation Metrics
// ============================================================
// Running counts over one generation run, logged at the end:
//
//   sentences:   continuations written
//   ended:       closed by <eos> within the word cap
//   capped:      cut at the word cap without <eos>
//   generated:   words the model added beyond the given prefix
//
// How to read them:
//   - capped close to sentences → the model rarely predicts <eos>,
//     or the prefixes are already near the cap
//   - mean_generated near 0 → prefixes use up most of the cap
//
// The same counts are saved as JSON next to the submission:
//   {"sentences":64,"ended":51,"capped":13,"generated":702}

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::domain::continuation::Continuation;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationMetrics {
    pub sentences: usize,
    pub ended:     usize,
    pub capped:    usize,
    pub generated: usize,
}

impl GenerationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one finished continuation whose given prefix
    /// had `prefix_words` words.
    pub fn record(&mut self, continuation: &Continuation, prefix_words: usize) {
        self.sentences += 1;
        if continuation.ended {
            self.ended += 1;
        } else {
            self.capped += 1;
        }
        self.generated += continuation.len().saturating_sub(prefix_words);
    }

    /// Mean number of model-added tokens per sentence.
    pub fn mean_generated(&self) -> f64 {
        if self.sentences == 0 {
            0.0
        } else {
            self.generated as f64 / self.sentences as f64
        }
    }

    /// Save the counts as one JSON object at `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write metrics '{}'", path.display()))?;
        tracing::info!("Metrics saved to '{}'", path.display());
        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            "Generated {} sentences: {} ended with <eos>, {} hit the word cap, {:.2} tokens added on average",
            self.sentences,
            self.ended,
            self.capped,
            self.mean_generated(),
        );
    }
}
