// ============================================================
// Layer 6 — Artifact Loader
// ============================================================
// Reads the three externally-produced artifacts once per process
// and keeps them for its whole lifetime:
//
//   artifacts/
//     preprocessor.json  ← fitted feature transformer
//     dnn_model.json     ← classifier architecture
//     dnn_model.mpk      ← classifier weights
//     meta.json          ← decision threshold
//
// ArtifactCache is a OnceLock: the first successful load is
// stored and every later call returns that same reference without
// touching the disk. A failed load stores nothing and is reported
// to the caller, which treats it as fatal.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::data::preprocessor::FittedPreprocessor;
use crate::domain::error::PlacementError;
use crate::domain::traits::{FeatureTransformer, PlacementClassifier};
use crate::infra::checkpoint::ModelStore;
use crate::infra::meta::ModelMeta;
use crate::ml::inferencer::Inferencer;

pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub preprocessor:  PathBuf,
    pub model_config:  PathBuf,
    /// Without extension; the record file is `<stem>.mpk`
    pub model_weights: PathBuf,
    pub meta:          PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            preprocessor:  dir.join("preprocessor.json"),
            model_config:  dir.join("dnn_model.json"),
            model_weights: dir.join("dnn_model"),
            meta:          dir.join("meta.json"),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ARTIFACTS_DIR)
    }
}

/// Everything a prediction needs, loaded and cross-checked.
pub struct Artifacts {
    pub preprocessor: FittedPreprocessor,
    pub model:        Inferencer,
    pub meta:         ModelMeta,
}

pub fn load_artifacts(paths: &ArtifactPaths) -> Result<Artifacts, PlacementError> {
    tracing::info!("Loading preprocessor from '{}'", paths.preprocessor.display());
    let json = fs::read_to_string(&paths.preprocessor)
        .map_err(|e| PlacementError::artifact("preprocessor", &paths.preprocessor, e))?;
    let preprocessor = FittedPreprocessor::from_json(&json)
        .map_err(|e| PlacementError::artifact("preprocessor", &paths.preprocessor, e))?;

    let store = ModelStore::new(&paths.model_config, &paths.model_weights);
    let model = Inferencer::from_checkpoint(&store)?;

    // Transformer output feeds the model input directly
    if preprocessor.output_dim() != model.input_dim() {
        return Err(PlacementError::artifact(
            "model config",
            &paths.model_config,
            format!(
                "model expects {} features but the preprocessor produces {}",
                model.input_dim(),
                preprocessor.output_dim()
            ),
        ));
    }

    let meta = ModelMeta::load(&paths.meta)?;
    tracing::info!(
        "Artifacts ready: {} features, threshold {:.3}",
        preprocessor.output_dim(),
        meta.threshold
    );

    Ok(Artifacts { preprocessor, model, meta })
}

/// Init-once holder for the loaded artifacts.
pub struct ArtifactCache {
    cell: OnceLock<Artifacts>,
}

impl ArtifactCache {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Load on first call; afterwards return the stored artifacts.
    /// `paths` is only consulted by the call that performs the load.
    pub fn get_or_load(&self, paths: &ArtifactPaths) -> Result<&Artifacts, PlacementError> {
        if let Some(loaded) = self.cell.get() {
            tracing::debug!("Using cached artifacts");
            return Ok(loaded);
        }
        let loaded = load_artifacts(paths)?;
        Ok(self.cell.get_or_init(|| loaded))
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

static ARTIFACTS: ArtifactCache = ArtifactCache::new();

/// Process-wide artifacts, loaded from `paths` on first use.
pub fn artifacts(paths: &ArtifactPaths) -> Result<&'static Artifacts, PlacementError> {
    ARTIFACTS.get_or_load(paths)
}
