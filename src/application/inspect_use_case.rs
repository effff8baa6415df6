// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads the model config and the vocabulary, without weights,
// and reports whether they belong together. Useful before a
// long generation run on a new machine.

use anyhow::Result;
use std::fmt;

use crate::domain::vocabulary::SpecialTokens;
use crate::infra::{checkpoint::ModelStore, vocab_store::VocabStore};

/// What a vocabulary and a model directory say about themselves.
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    /// Entries in the vocabulary file
    pub vocab_words:      usize,
    pub bos:              u32,
    pub eos:              u32,
    pub pad:              u32,
    pub unk:              u32,
    /// vocab_size from model_config.json
    pub model_vocab_size: usize,
    pub embedding_dim:    usize,
    pub hidden_dim:       usize,
    pub projection_dim:   Option<usize>,
}

impl ArtifactReport {
    /// True when the model's output layer covers exactly the vocabulary.
    pub fn is_consistent(&self) -> bool {
        self.vocab_words == self.model_vocab_size
    }
}

impl fmt::Display for ArtifactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vocabulary:  {} words", self.vocab_words)?;
        writeln!(
            f,
            "special ids: <bos>={} <eos>={} <pad>={} <unk>={}",
            self.bos, self.eos, self.pad, self.unk
        )?;
        writeln!(
            f,
            "model:       vocab={} embedding={} hidden={} projection={}",
            self.model_vocab_size,
            self.embedding_dim,
            self.hidden_dim,
            self.projection_dim.map_or("none".to_string(), |d| d.to_string()),
        )?;
        if self.is_consistent() {
            write!(f, "status:      ok")
        } else {
            write!(
                f,
                "status:      MISMATCH (vocabulary has {} words, model expects {})",
                self.vocab_words, self.model_vocab_size
            )
        }
    }
}

pub struct InspectUseCase {
    vocab_path: String,
    model_dir:  String,
}

impl InspectUseCase {
    pub fn new(vocab_path: String, model_dir: String) -> Self {
        Self { vocab_path, model_dir }
    }

    /// Load both artifacts (no weights) and describe them.
    pub fn report(&self) -> Result<ArtifactReport> {
        let vocab     = VocabStore::new(&self.vocab_path).load()?;
        let model_cfg = ModelStore::new(&self.model_dir).load_config()?;
        let SpecialTokens { bos, eos, pad, unk } = vocab.specials();

        Ok(ArtifactReport {
            vocab_words:      vocab.len(),
            bos, eos, pad, unk,
            model_vocab_size: model_cfg.vocab_size,
            embedding_dim:    model_cfg.embedding_dim,
            hidden_dim:       model_cfg.hidden_dim,
            projection_dim:   model_cfg.projection_dim,
        })
    }
}
