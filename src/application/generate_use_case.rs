// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Orchestrates the full continuation pipeline in order:
//
//   Step 1: Check the configuration          (this layer)
//   Step 2: Load the vocabulary              (Layer 6 - infra)
//   Step 3: Load the pre-trained model       (Layer 6 - infra)
//   Step 4: Load the sentence prefixes       (Layer 4 - data)
//   Step 5: Encode prefixes into a dataset   (Layer 4 - data)
//   Step 6: Greedy-decode batch by batch     (Layer 5 - ml)
//   Step 7: Truncate and render to words     (Layer 3 - domain)
//   Step 8: Write the submission file        (Layer 6 - infra)
//           and its metrics alongside it
//
// Reference: Burn Book §4 (DataLoader)

use anyhow::{bail, Result};
use burn::{data::dataloader::DataLoaderBuilder, prelude::*};
use std::path::PathBuf;

use crate::data::{
    batcher::ContinuationBatcher,
    dataset::ContinuationDataset,
    loader::ContinuationLoader,
};
use crate::domain::{
    continuation::Continuation,
    traits::{PromptSource, SubmissionSink},
    vocabulary::Vocabulary,
};
use crate::infra::{
    checkpoint::ModelStore,
    metrics::GenerationMetrics,
    submission::SubmissionWriter,
    vocab_store::VocabStore,
};
use crate::ml::decoder::{into_rows, GreedyDecoder, StepModel};

// ─── Generation Configuration ─────────────────────────────────────────────────
// Defaults follow the trained model: sentences of 30 tokens
// including <bos>/<eos>, batches of 64, continuations capped
// at 20 words.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub continuation_path: String,
    pub vocab_path:        String,
    pub model_dir:         String,
    pub weights:           Option<String>,
    pub submission_path:   String,
    pub sentence_length:   usize,
    pub batch_size:        usize,
    pub max_words:         usize,
    /// Only continue the first N prefixes
    pub limit:             Option<usize>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            continuation_path: "data/sentences.continuation".to_string(),
            vocab_path:        "data/vocab.txt".to_string(),
            model_dir:         "model".to_string(),
            weights:           None,
            submission_path:   "group.continuation".to_string(),
            sentence_length:   30,
            batch_size:        64,
            max_words:         20,
            limit:             None,
        }
    }
}

impl GenerateConfig {
    /// `<submission>.metrics.json`, written next to the submission.
    pub fn metrics_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.metrics.json", self.submission_path))
    }

    /// Columns per row of the decode buffer: the sentence minus its final <eos>.
    pub fn buffer_width(&self) -> usize {
        self.sentence_length.saturating_sub(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if self.max_words == 0 {
            bail!("max_words must be at least 1");
        }
        // <bos> + max_words + 1 steps of lookahead must fit in the buffer
        let needed = self.max_words + 2;
        if self.buffer_width() < needed {
            bail!(
                "sentence_length {} is too short for {} words; it must be at least {}",
                self.sentence_length,
                self.max_words,
                needed + 1
            );
        }
        Ok(())
    }
}

// ─── GenerateUseCase ──────────────────────────────────────────────────────────
pub struct GenerateUseCase {
    config: GenerateConfig,
}

impl GenerateUseCase {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline on `device` and return the run metrics.
    pub fn execute<B: Backend>(&self, device: &B::Device) -> Result<GenerationMetrics> {
        let cfg = &self.config;

        // ── Step 1: Reject impossible settings before loading anything ───────
        cfg.validate()?;

        // ── Step 2: Vocabulary ────────────────────────────────────────────────
        let vocab = VocabStore::new(&cfg.vocab_path).load()?;

        // ── Step 3: Model ─────────────────────────────────────────────────────
        let mut store = ModelStore::new(&cfg.model_dir);
        if let Some(weights) = &cfg.weights {
            store = store.with_weights(weights);
        }
        let model_cfg = store.load_config()?;
        if model_cfg.vocab_size != vocab.len() {
            bail!(
                "Model expects a vocabulary of {} words but '{}' has {}",
                model_cfg.vocab_size,
                cfg.vocab_path,
                vocab.len()
            );
        }
        tracing::info!("model: {:?}", model_cfg);
        let model = store.load_model::<B>(&model_cfg, device)?;
        tracing::info!("Model ready: {} parameters", model.num_params());

        // ── Step 4: Prefixes ──────────────────────────────────────────────────
        let loader = ContinuationLoader::new(&cfg.continuation_path);
        let mut prompts = loader.load_prompts()?;
        if let Some(limit) = cfg.limit {
            prompts.truncate(limit);
            tracing::info!("Limiting run to the first {} prefixes", prompts.len());
        }

        // ── Steps 5-7: Encode, decode, render ─────────────────────────────────
        let (sentences, metrics) = continue_prompts(&prompts, &vocab, &model, cfg, device)?;

        // ── Step 8: Submission ────────────────────────────────────────────────
        SubmissionWriter::new(&cfg.submission_path).write_all(&sentences)?;
        metrics.log();
        metrics.write_json(&cfg.metrics_path())?;

        Ok(metrics)
    }
}

/// Continue every prompt with `model`, returning the rendered lines
/// in prompt order together with the run metrics.
pub fn continue_prompts<B: Backend, M: StepModel<B>>(
    prompts: &[String],
    vocab:   &Vocabulary,
    model:   &M,
    cfg:     &GenerateConfig,
    device:  &B::Device,
) -> Result<(Vec<String>, GenerationMetrics)> {
    let eos     = vocab.specials().eos;
    let decoder = GreedyDecoder::new(cfg.max_words, &vocab.specials());
    let dataset = ContinuationDataset::encode(prompts, vocab, cfg.buffer_width());
    tracing::debug!("Encoded {} prefixes", dataset.sample_count());

    // No worker threads: batches must come back in file order
    let batches = DataLoaderBuilder::new(ContinuationBatcher::<B>::new())
        .batch_size(cfg.batch_size)
        .set_device(device.clone())
        .build(dataset);

    let mut sentences = Vec::with_capacity(prompts.len());
    let mut metrics   = GenerationMetrics::new();

    for (index, batch) in batches.iter().enumerate() {
        let decoded = decoder.decode(model, batch.tokens)?;

        for (row, &prefix_words) in into_rows(decoded).iter().zip(&batch.prefix_words) {
            let continuation = Continuation::from_row(row, eos, cfg.max_words);
            metrics.record(&continuation, prefix_words);
            sentences.push(continuation.render(vocab));
        }
        tracing::debug!("Batch {} done, {} sentences so far", index + 1, sentences.len());
    }

    Ok((sentences, metrics))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::tests::sample_vocab;
    use crate::infra::checkpoint::fixtures::write_model_dir;
    use crate::ml::model::LanguageModelConfig;
    use std::fs;

    type TestBackend = burn::backend::NdArray;

    /// Always predicts the same word so outputs are predictable.
    struct Constant(usize);

    impl<B: Backend> StepModel<B> for Constant {
        type State = ();

        fn step(&self, tokens: Tensor<B, 1, Int>, _state: Option<()>) -> (Tensor<B, 2>, ()) {
            let [batch] = tokens.dims();
            let vocab   = 9;
            let mut logits = vec![0.0f32; batch * vocab];
            for row in 0..batch {
                logits[row * vocab + self.0] = 1.0;
            }
            let logits = Tensor::<B, 1>::from_floats(logits.as_slice(), &tokens.device())
                .reshape([batch, vocab]);
            (logits, ())
        }
    }

    /// Predicts `word` until step `eos_at`, then <eos>; the state is the step number.
    struct LateEos {
        word:   usize,
        eos_at: usize,
    }

    impl<B: Backend> StepModel<B> for LateEos {
        type State = usize;

        fn step(&self, tokens: Tensor<B, 1, Int>, state: Option<usize>) -> (Tensor<B, 2>, usize) {
            let [batch] = tokens.dims();
            let step    = state.unwrap_or(0);
            let target  = if step >= self.eos_at { 1 } else { self.word };
            let vocab   = 9;
            let mut logits = vec![0.0f32; batch * vocab];
            for row in 0..batch {
                logits[row * vocab + target] = 1.0;
            }
            let logits = Tensor::<B, 1>::from_floats(logits.as_slice(), &tokens.device())
                .reshape([batch, vocab]);
            (logits, step + 1)
        }
    }

    fn prompts(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let cfg = GenerateConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.buffer_width(), 29);
    }

    #[test]
    fn test_rejects_short_sentence_length() {
        let cfg = GenerateConfig { sentence_length: 22, ..GenerateConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = GenerateConfig { sentence_length: 23, ..GenerateConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let cfg = GenerateConfig { batch_size: 0, ..GenerateConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_eos_model_appends_eos_to_prefix() {
        let v   = sample_vocab();
        let cfg = GenerateConfig::default();
        let (lines, metrics) = continue_prompts::<TestBackend, _>(
            &prompts(&["the cat sat", "on the mat", "dog"]),
            &v, &Constant(1), &cfg, &Default::default(),
        ).unwrap();

        assert_eq!(lines, vec!["the cat sat <eos>", "on the mat <eos>", "<unk> <eos>"]);
        assert_eq!(metrics.ended, 3);
        assert_eq!(metrics.generated, 3);
    }

    #[test]
    fn test_never_ending_model_is_capped() {
        let v   = sample_vocab();
        let cfg = GenerateConfig { max_words: 5, ..GenerateConfig::default() };
        let (lines, metrics) = continue_prompts::<TestBackend, _>(
            &prompts(&["the", ""]), &v, &Constant(8), &cfg, &Default::default(),
        ).unwrap();

        assert_eq!(lines, vec!["the mat mat mat mat", "mat mat mat mat mat"]);
        assert_eq!(metrics.capped, 2);
    }

    #[test]
    fn test_eos_on_final_step_closes_full_sentence() {
        let v   = sample_vocab();
        let cfg = GenerateConfig::default();
        // Steps 0..=19 predict "mat", step 20 (the last) predicts <eos>
        let model = LateEos { word: 8, eos_at: 20 };
        let (lines, metrics) = continue_prompts::<TestBackend, _>(
            &prompts(&["the"]), &v, &model, &cfg, &Default::default(),
        ).unwrap();

        let mut expected = vec!["the"];
        expected.extend(std::iter::repeat("mat").take(19));
        expected.push("<eos>");
        assert_eq!(lines, vec![expected.join(" ")]);
        assert_eq!(metrics.ended, 1);
        assert_eq!(metrics.capped, 0);
    }

    #[test]
    fn test_order_is_kept_across_batches() {
        let v   = sample_vocab();
        let cfg = GenerateConfig { batch_size: 2, ..GenerateConfig::default() };
        let words = ["the", "cat", "sat", "on", "mat"];
        let (lines, metrics) = continue_prompts::<TestBackend, _>(
            &prompts(&words), &v, &Constant(1), &cfg, &Default::default(),
        ).unwrap();

        assert_eq!(metrics.sentences, 5);
        for (line, word) in lines.iter().zip(words) {
            assert_eq!(line, &format!("{word} <eos>"));
        }
    }

    #[test]
    fn test_execute_end_to_end() {
        let dir    = tempfile::tempdir().unwrap();
        let root   = dir.path();
        let device = Default::default();

        fs::write(root.join("vocab.txt"), "<bos>\n<eos>\n<pad>\n<unk>\nthe\ncat\nsat\non\nmat\n").unwrap();
        fs::write(root.join("prefixes.txt"), "the cat\non the mat\n\nsat\n").unwrap();
        let model_dir = root.join("model");
        fs::create_dir_all(&model_dir).unwrap();
        let model_cfg = LanguageModelConfig::new(9).with_embedding_dim(4).with_hidden_dim(8);
        write_model_dir::<TestBackend>(&model_dir, &model_cfg, 1, &device);

        let cfg = GenerateConfig {
            continuation_path: root.join("prefixes.txt").display().to_string(),
            vocab_path:        root.join("vocab.txt").display().to_string(),
            model_dir:         model_dir.display().to_string(),
            submission_path:   root.join("out/submission.txt").display().to_string(),
            batch_size:        3,
            ..GenerateConfig::default()
        };
        let metrics = GenerateUseCase::new(cfg).execute::<TestBackend>(&device).unwrap();
        assert_eq!(metrics.sentences, 4);

        let report: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(root.join("out/submission.txt.metrics.json")).unwrap(),
        ).unwrap();
        assert_eq!(report["sentences"], 4);
        assert_eq!(report["ended"].as_u64().unwrap() + report["capped"].as_u64().unwrap(), 4);

        let written = fs::read_to_string(root.join("out/submission.txt")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("the cat"));
        assert!(lines[1].starts_with("on the mat"));
        assert!(lines[3].starts_with("sat"));
        for line in &lines {
            let words = line.split_whitespace().filter(|w| *w != "<eos>").count();
            assert!(words <= 20, "{line}");
        }
    }

    #[test]
    fn test_execute_rejects_vocab_size_mismatch() {
        let dir    = tempfile::tempdir().unwrap();
        let root   = dir.path();
        let device = Default::default();

        fs::write(root.join("vocab.txt"), "<bos>\n<eos>\n<pad>\n<unk>\n").unwrap();
        fs::write(root.join("prefixes.txt"), "the\n").unwrap();
        let model_cfg = LanguageModelConfig::new(9).with_embedding_dim(4).with_hidden_dim(8);
        write_model_dir::<TestBackend>(root, &model_cfg, 1, &device);

        let cfg = GenerateConfig {
            continuation_path: root.join("prefixes.txt").display().to_string(),
            vocab_path:        root.join("vocab.txt").display().to_string(),
            model_dir:         root.display().to_string(),
            submission_path:   root.join("submission.txt").display().to_string(),
            ..GenerateConfig::default()
        };
        let err = GenerateUseCase::new(cfg).execute::<TestBackend>(&device).unwrap_err();
        assert!(err.to_string().contains("vocabulary of 9 words"));
        assert!(!root.join("submission.txt").exists());
    }
}
