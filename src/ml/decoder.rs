// ============================================================
// Layer 5 — Greedy Decoder
// ============================================================
// Fixed-iteration greedy decoding over a batch token buffer.
//
// The buffer holds one row per sentence:
//
//   col:   0      1    2    3      4      5     ...
//        [<bos>, the, cat, <pad>, <pad>, <pad>, ...]
//
// Step i feeds column i to the model and writes the argmax
// prediction into column i + 1, but ONLY where that slot is a
// placeholder (<pad> or <eos>). Words from the given prefix
// are never overwritten: the model reads the prefix as given
// and runs on its own predictions after it.
//
// With max_words = 20 the loop runs 21 steps: <bos> is the
// first input, so 21 inputs fill columns 1..=21.
//
// argmax is taken over the raw logits; softmax is monotonic
// and would pick the same index.

use anyhow::{ensure, Result};
use burn::prelude::*;

use crate::domain::vocabulary::SpecialTokens;

/// A recurrent model that can be advanced one time step at a time.
pub trait StepModel<B: Backend> {
    /// Hidden state carried from one step to the next
    type State;

    /// tokens: [batch] → logits: [batch, vocab_size]
    /// `state` is None on the first step.
    fn step(&self, tokens: Tensor<B, 1, Int>, state: Option<Self::State>) -> (Tensor<B, 2>, Self::State);
}

#[derive(Debug, Clone)]
pub struct GreedyDecoder {
    max_words: usize,
    eos:       u32,
    pad:       u32,
}

impl GreedyDecoder {
    pub fn new(max_words: usize, specials: &SpecialTokens) -> Self {
        Self {
            max_words,
            eos: specials.eos,
            pad: specials.pad,
        }
    }

    /// Number of model steps per batch.
    pub fn steps(&self) -> usize {
        self.max_words + 1
    }

    /// Smallest buffer width the decoder can fill.
    pub fn min_width(&self) -> usize {
        self.steps() + 1
    }

    /// Run the decode loop and return the filled buffer.
    /// tokens: [batch, width] with width >= min_width()
    pub fn decode<B: Backend, M: StepModel<B>>(
        &self,
        model:      &M,
        mut tokens: Tensor<B, 2, Int>,
    ) -> Result<Tensor<B, 2, Int>> {
        let [batch_size, width] = tokens.dims();
        ensure!(
            width >= self.min_width(),
            "Token buffer has {} columns but {} are needed for {} words",
            width, self.min_width(), self.max_words
        );
        if batch_size == 0 {
            return Ok(tokens);
        }

        let mut state = None;
        for i in 0..self.steps() {
            let input = tokens.clone()
                .slice([0..batch_size, i..i + 1])
                .reshape([batch_size]);

            let (logits, next_state) = model.step(input, state);
            state = Some(next_state);

            let preds  = logits.argmax(1);                                      // [batch, 1]
            let target = tokens.clone().slice([0..batch_size, i + 1..i + 2]);    // [batch, 1]
            let fill   = self.placeholder_mask(target.clone());
            let merged = target.mask_where(fill, preds);

            tokens = tokens.slice_assign([0..batch_size, i + 1..i + 2], merged);
        }

        tracing::debug!("Decoded batch of {} rows in {} steps", batch_size, self.steps());
        Ok(tokens)
    }

    /// True where the slot holds <eos> or <pad>.
    fn placeholder_mask<B: Backend>(&self, slots: Tensor<B, 2, Int>) -> Tensor<B, 2, Bool> {
        let is_eos = slots.clone().equal_elem(self.eos as i64).int();
        let is_pad = slots.equal_elem(self.pad as i64).int();
        (is_eos + is_pad).greater_elem(0)
    }
}

/// Copy a decoded buffer back to the host, one Vec per row.
pub fn into_rows<B: Backend>(tokens: Tensor<B, 2, Int>) -> Vec<Vec<u32>> {
    let [_, width] = tokens.dims();
    if width == 0 {
        return Vec::new();
    }
    let flat: Vec<u32> = tokens
        .into_data()
        .iter::<i64>()
        .map(|t| t as u32)
        .collect();
    flat.chunks(width).map(<[u32]>::to_vec).collect()
}
