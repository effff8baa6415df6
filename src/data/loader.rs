// ============================================================
// Layer 4 — Continuation File Loader
// ============================================================
// Reads the file of sentence prefixes to be continued.
//
// Format: UTF-8 text, one prefix per line, words separated
// by whitespace, no <bos>/<eos> markers:
//
//   the cat sat on
//   i do n't think
//   ...
//
// Blank lines are kept as empty prefixes so line n of the
// submission always answers line n of this file.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::preprocessor::Preprocessor;
use crate::domain::traits::PromptSource;

/// Loads all sentence prefixes from a continuation file.
/// Implements the PromptSource trait from Layer 3.
pub struct ContinuationLoader {
    path:         PathBuf,
    preprocessor: Preprocessor,
}

impl ContinuationLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:         path.into(),
            preprocessor: Preprocessor::new(),
        }
    }
}

impl PromptSource for ContinuationLoader {
    fn load_prompts(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read continuation file '{}'", self.path.display()))?;

        let prompts: Vec<String> = text
            .lines()
            .map(|line| self.preprocessor.clean_line(line))
            .collect();

        tracing::info!(
            "Loaded {} sentence prefixes from '{}'",
            prompts.len(),
            self.path.display()
        );
        Ok(prompts)
    }
}
