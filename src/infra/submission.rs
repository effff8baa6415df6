// ============================================================
// Layer 6 — Submission Writer
// ============================================================
// Writes one continuation per line, tokens separated by one
// space, in the same order as the continuation file:
//
//   the cat sat on the mat <eos>
//   i do n't think so . <eos>
//   ...
//
// The file is written through a BufWriter and flushed before
// returning, so an I/O error surfaces here and not on drop.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::domain::traits::SubmissionSink;

/// Writes continuations to a text file, one per line.
pub struct SubmissionWriter {
    path: PathBuf,
}

impl SubmissionWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SubmissionSink for SubmissionWriter {
    fn write_all(&self, sentences: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create submission '{}'", self.path.display()))?;
        let mut out = BufWriter::new(file);
        for sentence in sentences {
            writeln!(out, "{sentence}")?;
        }
        out.flush()
            .with_context(|| format!("Cannot write submission '{}'", self.path.display()))?;

        tracing::info!("Wrote {} sentences to '{}'", sentences.len(), self.path.display());
        Ok(())
    }
}
