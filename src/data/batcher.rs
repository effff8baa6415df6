// ============================================================
// Layer 4 — Continuation Batcher
// ============================================================
// Implements Burn's Batcher trait to stack encoded prefixes
// into the token buffer the decoder works on.
//
//   Input:  Vec of N ContinuationSamples, each of width W
//   Output: ContinuationBatch with tokens of shape [N, W]
//
// All rows are already padded to W by ContinuationSample, so
// the batcher only flattens and reshapes. The last batch of a
// file may hold fewer than batch_size rows; the model does not
// care about the batch dimension so it is not padded out.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};
use std::marker::PhantomData;

use crate::data::dataset::ContinuationSample;

// ─── ContinuationBatch ────────────────────────────────────────────────────────
/// A batch of prefixes ready for greedy decoding.
#[derive(Debug, Clone)]
pub struct ContinuationBatch<B: Backend> {
    /// Token buffer — shape: [batch_size, width]
    /// Column 0 is <bos>, predictions are written in place
    pub tokens: Tensor<B, 2, Int>,

    /// Given prefix words per row (<bos> not counted), kept on the host for reporting
    pub prefix_words: Vec<usize>,
}

// ─── ContinuationBatcher ──────────────────────────────────────────────────────
/// Generic over the backend so the DataLoader knows which
/// backend's tensors it produces; the device is chosen by the
/// DataLoader and passed in per batch.
#[derive(Clone, Debug, Default)]
pub struct ContinuationBatcher<B: Backend> {
    backend: PhantomData<B>,
}

impl<B: Backend> ContinuationBatcher<B> {
    pub fn new() -> Self {
        Self { backend: PhantomData }
    }
}

impl<B: Backend> Batcher<B, ContinuationSample, ContinuationBatch<B>> for ContinuationBatcher<B> {
    fn batch(&self, items: Vec<ContinuationSample>, device: &B::Device) -> ContinuationBatch<B> {
        let batch_size = items.len();
        let width      = items.first().map_or(0, |s| s.token_ids.len());

        // Vec<Vec<u32>> → Vec<i32>, row-major (Burn uses i32 input for Int tensors)
        let flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.token_ids.iter().map(|&x| x as i32))
            .collect();

        let tokens = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device)
            .reshape([batch_size, width]);

        let prefix_words = items.iter().map(ContinuationSample::prefix_words).collect();

        ContinuationBatch { tokens, prefix_words }
    }
}
