use burn::data::dataset::Dataset;

use crate::domain::vocabulary::Vocabulary;

/// One encoded sentence prefix, padded to the decode buffer width.
/// Layout: [<bos>] prefix words [<pad>]...
#[derive(Debug, Clone)]
pub struct ContinuationSample {
    pub token_ids:  Vec<u32>,
    /// <bos> plus the prefix words that fit in the buffer
    pub prefix_len: usize,
}

impl ContinuationSample {
    /// Encode `prompt` into a row of exactly `width` tokens.
    /// Words that do not fit after <bos> are dropped.
    pub fn encode(prompt: &str, vocab: &Vocabulary, width: usize) -> Self {
        let specials = vocab.specials();

        let mut token_ids = Vec::with_capacity(width);
        token_ids.push(specials.bos);
        token_ids.extend(
            prompt
                .split_whitespace()
                .map(|w| vocab.word_to_index(w))
                .take(width.saturating_sub(1)),
        );
        token_ids.truncate(width);
        let prefix_len = token_ids.len();
        token_ids.resize(width, specials.pad);

        Self { token_ids, prefix_len }
    }

    /// Prefix words, not counting <bos>.
    pub fn prefix_words(&self) -> usize {
        self.prefix_len.saturating_sub(1)
    }
}

pub struct ContinuationDataset {
    samples: Vec<ContinuationSample>,
}

impl ContinuationDataset {
    pub fn new(samples: Vec<ContinuationSample>) -> Self { Self { samples } }

    /// Encode every prompt with a buffer of `width` tokens per row.
    pub fn encode(prompts: &[String], vocab: &Vocabulary, width: usize) -> Self {
        let samples = prompts
            .iter()
            .map(|p| ContinuationSample::encode(p, vocab, width))
            .collect();
        Self::new(samples)
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<ContinuationSample> for ContinuationDataset {
    fn get(&self, index: usize) -> Option<ContinuationSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
