// ============================================================
// Layer 3 — Continuation Domain Type
// ============================================================
// After decoding, every row of the batch buffer looks like:
//
//   [<bos>, w1, ..., wk, p1, p2, ..., <eos>, junk, ...]
//     ^ given prefix ^    ^ predicted ^
//
// Truncation keeps everything after <bos> up to and including
// the first <eos>. The cap counts words only, so <eos> may sit
// right after the last allowed word (the final decode step).
// When no <eos> appears by then the row is cut at the cap.
//
// Example with max_words = 4:
//   [0, 5, 6, 1, 2, 2]     →  [5, 6, 1]         (ended at <eos>)
//   [0, 5, 6, 7, 8, 1]     →  [5, 6, 7, 8, 1]   (ended on the last step)
//   [0, 5, 6, 7, 8, 9, 1]  →  [5, 6, 7, 8]      (hit the cap)

use crate::domain::vocabulary::Vocabulary;

/// One finished sentence, still as model indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    /// Indices after <bos>: at most `max_words` words, plus <eos> when ended
    pub ids: Vec<u32>,

    /// True when the sentence was closed by <eos> within the cap
    pub ended: bool,
}

impl Continuation {
    /// Cut a decoded row at its first <eos> (inclusive) or at `max_words`.
    pub fn from_row(row: &[u32], eos: u32, max_words: usize) -> Self {
        // Position 0 is always <bos>; search starts after it
        let body = row.get(1..).unwrap_or(&[]);
        let eos_pos = body.iter().position(|&t| t == eos);

        match eos_pos {
            Some(pos) if pos <= max_words => Self {
                ids:   body[..=pos].to_vec(),
                ended: true,
            },
            _ => Self {
                ids:   body[..max_words.min(body.len())].to_vec(),
                ended: false,
            },
        }
    }

    /// Number of tokens, <eos> included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Map indices back to words.
    pub fn words<'v>(&self, vocab: &'v Vocabulary) -> Vec<&'v str> {
        self.ids.iter().map(|&id| vocab.index_to_word(id)).collect()
    }

    /// Space-joined text, as written to the submission file.
    pub fn render(&self, vocab: &Vocabulary) -> String {
        self.words(vocab).join(" ")
    }
}
