// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Loads the vocabulary the model was trained with. Two formats:
//
//   vocab.txt       — one token per line, line number = index
//                     (a blank line would shift every later index,
//                     so it is rejected)
//   tokenizer.json  — a HuggingFace tokenizer; its vocabulary
//                     (added tokens included) is used as-is
//
// The vocabulary is never built or extended here.

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};
use tokenizers::Tokenizer;

use crate::domain::vocabulary::Vocabulary;

/// Loads a Vocabulary from disk; the format is picked by file extension.
pub struct VocabStore {
    path: PathBuf,
}

impl VocabStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `.json` files are read as tokenizer.json, anything else as a word list.
    pub fn load(&self) -> Result<Vocabulary> {
        let vocab = if is_tokenizer_json(&self.path) {
            self.load_tokenizer_json()?
        } else {
            self.load_word_list()?
        };
        tracing::info!(
            "Vocabulary of {} words loaded from '{}'",
            vocab.len(),
            self.path.display()
        );
        Ok(vocab)
    }

    fn load_word_list(&self) -> Result<Vocabulary> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read vocabulary '{}'", self.path.display()))?;
        let mut words = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let word = line.trim();
            if word.is_empty() {
                bail!(
                    "Blank line {} in vocabulary '{}'; every line must hold one token",
                    i + 1,
                    self.path.display()
                );
            }
            words.push(word.to_string());
        }
        Vocabulary::from_words(words)
            .with_context(|| format!("Invalid vocabulary '{}'", self.path.display()))
    }

    fn load_tokenizer_json(&self) -> Result<Vocabulary> {
        let tokenizer = Tokenizer::from_file(&self.path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", self.path.display(), e
            ))?;
        Vocabulary::from_index_map(tokenizer.get_vocab(true))
            .with_context(|| format!("Invalid tokenizer vocabulary '{}'", self.path.display()))
    }
}

fn is_tokenizer_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_line_number_is_index() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        fs::write(&path, "<bos>\n<eos>\n<pad>\n<unk>\nthe\ncat\n").unwrap();

        let v = VocabStore::new(&path).load().unwrap();
        assert_eq!(v.len(), 6);
        assert_eq!(v.word_to_index("cat"), 5);
        assert_eq!(v.specials().pad, 2);
    }

    #[test]
    fn test_word_list_trailing_newline_is_fine() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        fs::write(&path, "<bos>\r\n<eos>\r\n<pad>\r\n<unk>\r\nmat\r\n").unwrap();

        let v = VocabStore::new(&path).load().unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.index_to_word(4), "mat");
    }

    #[test]
    fn test_word_list_blank_line_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        fs::write(&path, "<bos>\n<eos>\n<pad>\n<unk>\n\nthe\ncat\n").unwrap();

        let err = VocabStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Blank line 5"), "{err}");
    }

    #[test]
    fn test_word_list_without_specials_fails() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        fs::write(&path, "the\ncat\n").unwrap();
        assert!(VocabStore::new(&path).load().is_err());
    }

    #[test]
    fn test_word_level_tokenizer_json() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        let json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": { "<bos>": 0, "<eos>": 1, "<pad>": 2, "<unk>": 3, "mat": 4 },
                "unk_token": "<unk>"
            }
        });
        fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

        let v = VocabStore::new(&path).load().unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.index_to_word(4), "mat");
        assert_eq!(v.specials().eos, 1);
    }
}
