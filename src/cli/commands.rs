// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `generate` and `inspect`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::generate_use_case::GenerateConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Continue every sentence prefix in a file and write the submission
    Generate(GenerateArgs),

    /// Check a model directory against a vocabulary without loading weights
    Inspect(InspectArgs),
}

/// All arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// File of sentence prefixes, one per line
    #[arg(long, default_value = "data/sentences.continuation")]
    pub continuation: String,

    /// Vocabulary: word list (one per line) or tokenizer.json
    #[arg(long, default_value = "data/vocab.txt")]
    pub vocab: String,

    /// Directory holding model_config.json and the weights
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Weights file to load instead of the one named by latest_epoch.json
    #[arg(long)]
    pub weights: Option<String>,

    /// Where to write the continuations
    #[arg(long, short, default_value = "group.continuation")]
    pub output: String,

    /// Sentence length the model was trained with, <bos> and <eos> included
    #[arg(long, default_value_t = 30)]
    pub sentence_length: usize,

    /// Number of prefixes decoded together
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Maximum number of words per continuation, a closing <eos> not counted
    #[arg(long, default_value_t = 20)]
    pub max_words: usize,

    /// Only continue the first N prefixes
    #[arg(long)]
    pub limit: Option<usize>,

    /// Run on the CPU (ndarray) instead of the GPU (wgpu)
    #[arg(long)]
    pub cpu: bool,
}

/// Convert CLI GenerateArgs into the application-layer GenerateConfig.
/// The application layer never sees clap types.
impl From<GenerateArgs> for GenerateConfig {
    fn from(a: GenerateArgs) -> Self {
        GenerateConfig {
            continuation_path: a.continuation,
            vocab_path:        a.vocab,
            model_dir:         a.model_dir,
            weights:           a.weights,
            submission_path:   a.output,
            sentence_length:   a.sentence_length,
            batch_size:        a.batch_size,
            max_words:         a.max_words,
            limit:             a.limit,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(long, default_value = "data/vocab.txt")]
    pub vocab: String,

    #[arg(long, default_value = "model")]
    pub model_dir: String,
}
