// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and hands off to
// Layer 2. Picking the compute backend also happens here, so
// the layers below stay generic over `Backend`.
//
//   1. `generate` — continue prefixes and write the submission
//   2. `inspect`  — check a model directory against a vocabulary

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{Commands, GenerateArgs, InspectArgs};

type GpuBackend = burn::backend::Wgpu;
type CpuBackend = burn::backend::NdArray;

#[derive(Parser, Debug)]
#[command(
    name = "sentence-continuation",
    version = "0.1.0",
    about = "Continue partial sentences with a pre-trained LSTM language model."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Inspect(args)  => run_inspect(args),
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    use crate::application::generate_use_case::GenerateUseCase;

    let cpu      = args.cpu;
    let output   = args.output.clone();
    let use_case = GenerateUseCase::new(args.into());

    let metrics = if cpu {
        let device = burn::backend::ndarray::NdArrayDevice::Cpu;
        tracing::info!("Using CPU device: {:?}", device);
        use_case.execute::<CpuBackend>(&device)?
    } else {
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        use_case.execute::<GpuBackend>(&device)?
    };

    println!(
        "Wrote {} continuations to {} ({} ended with <eos>, {} hit the cap)",
        metrics.sentences, output, metrics.ended, metrics.capped
    );
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let report = InspectUseCase::new(args.vocab, args.model_dir).report()?;
    println!("{report}");
    if !report.is_consistent() {
        bail!("vocabulary and model do not match");
    }
    Ok(())
}
