// ============================================================
// Layer 6 — Model Store
// ============================================================
// Restores a pre-trained language model from disk using Burn's
// CompactRecorder. Nothing here writes weights.
//
// Expected directory layout:
//   model/
//     model_config.json      ← LanguageModelConfig (architecture)
//     latest_epoch.json      ← number of the epoch to load, e.g. 7
//     model_epoch_7.mpk.gz   ← weights
//
// A weights file can also be named explicitly, in which case
// latest_epoch.json is not read.
//
// The config is loaded first because the model has to be built
// with the right shapes before the record can be loaded into it;
// CompactRecorder refuses records whose shapes do not match.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::ml::model::{LanguageModel, LanguageModelConfig};

const CONFIG_FILE: &str = "model_config.json";
const LATEST_FILE: &str = "latest_epoch.json";
/// Extension CompactRecorder appends to every record path
const RECORD_EXT:  &str = ".mpk.gz";

/// Read-only view of a model directory written at training time.
pub struct ModelStore {
    /// Holds model_config.json, latest_epoch.json and the records
    dir:     PathBuf,
    /// Explicit record path, overriding latest_epoch.json
    weights: Option<PathBuf>,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), weights: None }
    }

    /// Load weights from `path` instead of following latest_epoch.json.
    pub fn with_weights(mut self, path: impl Into<PathBuf>) -> Self {
        self.weights = Some(path.into());
        self
    }

    /// Read the model architecture from model_config.json.
    pub fn load_config(&self) -> Result<LanguageModelConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read model config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed model config '{}'", path.display()))
    }

    /// Build the model described by `config` and load its weights.
    pub fn load_model<B: Backend>(
        &self,
        config: &LanguageModelConfig,
        device: &B::Device,
    ) -> Result<LanguageModel<B>> {
        let path  = self.record_path()?;
        let model = config.init::<B>(device);

        tracing::info!("Loading weights from '{}{}'", path.display(), RECORD_EXT);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load weights '{}{}'", path.display(), RECORD_EXT)
            })?;

        Ok(model.load_record(record))
    }

    /// Weights path without the recorder extension.
    fn record_path(&self) -> Result<PathBuf> {
        match &self.weights {
            Some(path) => Ok(strip_record_ext(path)),
            None => {
                let epoch = self.latest_epoch()?;
                Ok(self.dir.join(format!("model_epoch_{epoch}")))
            }
        }
    }

    /// Epoch number stored in latest_epoch.json, e.g. `7`.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join(LATEST_FILE);
        let s = fs::read_to_string(&path)
            .with_context(|| {
                format!("Cannot find '{}'. Pass --weights to pick a file explicitly.", path.display())
            })?;
        serde_json::from_str::<usize>(s.trim())
            .with_context(|| format!("'{}' does not hold an epoch number", path.display()))
    }
}

/// CompactRecorder sets the extension itself, so a path given as
/// `model.mpk.gz` would otherwise be read as `model.mpk.mpk.gz`.
fn strip_record_ext(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_suffix(RECORD_EXT) {
        Some(stem) => PathBuf::from(stem),
        None => path.to_path_buf(),
    }
}
