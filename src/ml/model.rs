use burn::{
    nn::{
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
};

use crate::ml::decoder::StepModel;

// Saved next to the weights as model_config.json. Config already derives
// Clone and serde, so only Debug is added here.
#[derive(Config, Debug)]
pub struct LanguageModelConfig {
    pub vocab_size:    usize,
    #[config(default = 100)]
    pub embedding_dim: usize,
    #[config(default = 512)]
    pub hidden_dim:    usize,
    /// Down-projection of the LSTM output before the vocabulary layer,
    /// used by the larger 1024-unit model (1024 → 512)
    #[config(default = "None")]
    pub projection_dim: Option<usize>,
}

impl LanguageModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LanguageModel<B> {
        let embedding  = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let lstm       = LstmConfig::new(self.embedding_dim, self.hidden_dim, true).init(device);
        let projection = self
            .projection_dim
            .map(|d| LinearConfig::new(self.hidden_dim, d).with_bias(false).init(device));
        let output     = LinearConfig::new(self.output_input_dim(), self.vocab_size).init(device);
        LanguageModel { embedding, lstm, projection, output }
    }

    /// Width of the features that reach the vocabulary layer.
    pub fn output_input_dim(&self) -> usize {
        self.projection_dim.unwrap_or(self.hidden_dim)
    }
}

/// Word-level LSTM language model.
#[derive(Module, Debug)]
pub struct LanguageModel<B: Backend> {
    pub embedding:  Embedding<B>,
    pub lstm:       Lstm<B>,
    pub projection: Option<Linear<B>>,
    pub output:     Linear<B>,
}

impl<B: Backend> LanguageModel<B> {
    /// One time step for the whole batch.
    /// tokens: [batch] → logits: [batch, vocab_size]
    pub fn step(
        &self,
        tokens: Tensor<B, 1, Int>,
        state:  Option<LstmState<B, 2>>,
    ) -> (Tensor<B, 2>, LstmState<B, 2>) {
        let [batch_size] = tokens.dims();

        let x = self.embedding.forward(tokens.reshape([batch_size, 1])); // [batch, 1, emb]
        let (out, state) = self.lstm.forward(x, state);                  // [batch, 1, hidden]
        let [_, _, hidden] = out.dims();

        let mut h = out.reshape([batch_size, hidden]);
        if let Some(projection) = &self.projection {
            h = projection.forward(h);
        }
        (self.output.forward(h), state)
    }
}

impl<B: Backend> StepModel<B> for LanguageModel<B> {
    type State = LstmState<B, 2>;

    fn step(&self, tokens: Tensor<B, 1, Int>, state: Option<Self::State>) -> (Tensor<B, 2>, Self::State) {
        LanguageModel::step(self, tokens, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    /// Logits for every position of a full sequence in one LSTM pass.
    /// tokens: [batch, seq_len] → logits: [batch, seq_len, vocab_size]
    fn full_sequence(
        model:  &LanguageModel<TestBackend>,
        tokens: Tensor<TestBackend, 2, Int>,
    ) -> Tensor<TestBackend, 3> {
        let x = model.embedding.forward(tokens);
        let (out, _) = model.lstm.forward(x, None);
        let out = match &model.projection {
            Some(projection) => projection.forward(out),
            None => out,
        };
        model.output.forward(out)
    }

    fn tiny_config() -> LanguageModelConfig {
        LanguageModelConfig::new(12)
            .with_embedding_dim(4)
            .with_hidden_dim(6)
    }

    #[test]
    fn test_defaults_match_trained_model() {
        let cfg = LanguageModelConfig::new(20_000);
        assert_eq!(cfg.embedding_dim, 100);
        assert_eq!(cfg.hidden_dim, 512);
        assert_eq!(cfg.output_input_dim(), 512);
    }

    #[test]
    fn test_step_shapes() {
        let device = Default::default();
        let model: LanguageModel<TestBackend> = tiny_config().init(&device);

        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([0, 4, 7], &device);
        let (logits, state) = model.step(tokens.clone(), None);
        assert_eq!(logits.dims(), [3, 12]);
        assert_eq!(state.hidden.dims(), [3, 6]);
        assert_eq!(state.cell.dims(), [3, 6]);

        let (logits, _) = model.step(tokens, Some(state));
        assert_eq!(logits.dims(), [3, 12]);
    }

    #[test]
    fn test_projection_changes_output_width() {
        let device = Default::default();
        let cfg = tiny_config().with_projection_dim(Some(3));
        assert_eq!(cfg.output_input_dim(), 3);

        let model: LanguageModel<TestBackend> = cfg.init(&device);
        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([1, 2], &device);
        let (logits, _) = model.step(tokens, None);
        assert_eq!(logits.dims(), [2, 12]);
    }

    #[test]
    fn test_stepping_matches_full_sequence() {
        let device = Default::default();
        let model: LanguageModel<TestBackend> = tiny_config().init(&device);

        let seq = Tensor::<TestBackend, 2, Int>::from_ints([[0, 5, 9]], &device);
        let full = full_sequence(&model, seq.clone());

        let mut state = None;
        for t in 0..3 {
            let col = seq.clone().slice([0..1, t..t + 1]).reshape([1]);
            let (logits, next) = model.step(col, state);
            state = Some(next);
            let expected = full.clone().slice([0..1, t..t + 1, 0..12]).reshape([1, 12]);

            let got: Vec<f32>  = logits.into_data().iter::<f32>().collect();
            let want: Vec<f32> = expected.into_data().iter::<f32>().collect();
            for (g, w) in got.iter().zip(&want) {
                assert!((g - w).abs() < 1e-5, "step {t}: {g} != {w}");
            }
        }
    }
}
