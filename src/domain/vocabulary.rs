// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// A dense word <-> index table supplied alongside the trained
// model. Index i must mean the same word the model was trained
// with, so the table is never rebuilt here, only read.
//
// Four reserved tokens must be present:
//   <bos>  first input of every sentence
//   <eos>  end of sentence, decoding stops after it
//   <pad>  empty slot that the model is allowed to fill
//   <unk>  any word outside the vocabulary
//
// The original model was trained with <bos>=0, <eos>=1,
// <pad>=2, <unk>=3, but the ids are looked up rather than
// assumed so reordered vocabularies still work.

use anyhow::{bail, Result};
use std::collections::HashMap;

pub const BOS: &str = "<bos>";
pub const EOS: &str = "<eos>";
pub const PAD: &str = "<pad>";
pub const UNK: &str = "<unk>";

/// Indices of the reserved tokens inside a Vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTokens {
    pub bos: u32,
    pub eos: u32,
    pub pad: u32,
    pub unk: u32,
}

/// Bidirectional lookup between words and model indices.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Position i holds the word with index i
    words:    Vec<String>,
    index:    HashMap<String, u32>,
    specials: SpecialTokens,
}

impl Vocabulary {
    /// Build from an ordered word list: line number = index.
    pub fn from_words(words: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.clone(), i as u32).is_some() {
                bail!("Duplicate vocabulary entry '{}' at index {}", word, i);
            }
        }
        let specials = find_specials(&index)?;
        Ok(Self { words, index, specials })
    }

    /// Build from a word -> index map (e.g. a tokenizer.json vocab).
    /// The indices must cover 0..len with no gaps.
    pub fn from_index_map(map: HashMap<String, u32>) -> Result<Self> {
        let mut slots: Vec<Option<String>> = vec![None; map.len()];
        for (word, &id) in &map {
            let Some(slot) = slots.get_mut(id as usize) else {
                bail!("Index {} of '{}' is outside the dense range 0..{}", id, word, map.len());
            };
            if let Some(other) = slot.as_ref() {
                bail!("Index {} is assigned to both '{}' and '{}'", id, other, word);
            }
            *slot = Some(word.clone());
        }
        // Every slot is filled: map.len() distinct ids landed in map.len() slots
        let words = slots.into_iter().flatten().collect();
        let specials = find_specials(&map)?;
        Ok(Self { words, index: map, specials })
    }

    /// Index of `word`, or the <unk> index when it is not in the table.
    pub fn word_to_index(&self, word: &str) -> u32 {
        self.index.get(word).copied().unwrap_or(self.specials.unk)
    }

    /// Word for `id`; indices the table does not know render as <unk>.
    pub fn index_to_word(&self, id: u32) -> &str {
        self.words.get(id as usize).map(String::as_str).unwrap_or(UNK)
    }

    pub fn specials(&self) -> SpecialTokens {
        self.specials
    }

    /// Never zero: the four special tokens are always present.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.words.len()
    }
}

fn find_specials(index: &HashMap<String, u32>) -> Result<SpecialTokens> {
    let lookup = |token: &str| -> Result<u32> {
        match index.get(token) {
            Some(&id) => Ok(id),
            None => bail!("Vocabulary is missing the special token '{}'", token),
        }
    };
    Ok(SpecialTokens {
        bos: lookup(BOS)?,
        eos: lookup(EOS)?,
        pad: lookup(PAD)?,
        unk: lookup(UNK)?,
    })
}
