// ============================================================
// Layer 6 — Model Store
// ============================================================
// Restores the classifier artifact from two files:
//
//   dnn_model.json — PlacementDnnConfig (architecture)
//   dnn_model.mpk  — burn record with every weight and bias
//
// The architecture has to be rebuilt before the weights can be
// loaded into it, so the config is always read first. Loading
// fails if the record does not match the architecture.
//
// Weights use NamedMpkFileRecorder at full precision so the
// probabilities served match the ones measured at training time.

use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
};

use crate::domain::error::PlacementError;
use crate::ml::model::{PlacementDnn, PlacementDnnConfig};

type ModelRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

pub struct ModelStore {
    config_path: PathBuf,
    /// Record path without extension; the recorder appends ".mpk"
    weights_stem: PathBuf,
}

impl ModelStore {
    pub fn new(config_path: impl Into<PathBuf>, weights_stem: impl Into<PathBuf>) -> Self {
        Self {
            config_path:  config_path.into(),
            weights_stem: weights_stem.into(),
        }
    }

    pub fn weights_path(&self) -> PathBuf {
        self.weights_stem.with_extension("mpk")
    }

    pub fn load_config(&self) -> Result<PlacementDnnConfig, PlacementError> {
        let path = &self.config_path;
        let json = fs::read_to_string(path)
            .map_err(|e| PlacementError::artifact("model config", path, e))?;
        let config: PlacementDnnConfig = serde_json::from_str(&json)
            .map_err(|e| PlacementError::artifact("model config", path, e))?;

        if config.input_dim == 0 || config.hidden_dims.contains(&0) {
            return Err(PlacementError::artifact(
                "model config",
                path,
                "layer widths must be non-zero",
            ));
        }
        tracing::debug!("Read model config from '{}'", path.display());
        Ok(config)
    }

    /// Load the stored weights into a freshly built model of the
    /// same architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  PlacementDnn<B>,
        device: &B::Device,
    ) -> Result<PlacementDnn<B>, PlacementError> {
        let weights = self.weights_path();
        if !weights.is_file() {
            return Err(PlacementError::artifact("model weights", &weights, "file not found"));
        }

        let record = ModelRecorder::new()
            .load(self.weights_stem.clone(), device)
            .map_err(|e| PlacementError::artifact("model weights", &weights, format!("{e:?}")))?;

        tracing::debug!("Loaded model weights from '{}'", weights.display());
        Ok(model.load_record(record))
    }

    /// Write an architecture + weights pair. Used to build artifact
    /// directories for tests.
    #[cfg(test)]
    pub fn save<B: Backend>(
        &self,
        config: &PlacementDnnConfig,
        model:  &PlacementDnn<B>,
    ) -> anyhow::Result<()> {
        fs::write(&self.config_path, serde_json::to_string_pretty(config)?)?;
        ModelRecorder::new()
            .record(model.clone().into_record(), self.weights_stem.clone())
            .map_err(|e| anyhow::anyhow!("Failed to save weights: {e:?}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::PlacementClassifier;
    use crate::ml::inferencer::{InferBackend, Inferencer};

    fn store_in(dir: &std::path::Path) -> ModelStore {
        ModelStore::new(dir.join("dnn_model.json"), dir.join("dnn_model"))
    }

    #[test]
    fn test_saved_model_reloads_with_same_output() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = store_in(dir.path());
        let device = Default::default();
        let config = PlacementDnnConfig::new(5, vec![4]);
        let model: PlacementDnn<InferBackend> = config.init(&device);
        store.save(&config, &model).unwrap();
        assert!(store.weights_path().is_file());

        let features = [0.1, -0.4, 1.3, 0.0, 2.2];
        let direct   = Inferencer::from_model(model, config, device).predict_proba(&features).unwrap();
        let reloaded = Inferencer::from_checkpoint(&store).unwrap().predict_proba(&features).unwrap();
        assert!((direct - reloaded).abs() < 1e-6);
    }

    #[test]
    fn test_missing_weights_is_artifact_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("dnn_model.json"), r#"{"input_dim": 5, "hidden_dims": [4]}"#).unwrap();

        let err = Inferencer::from_checkpoint(&store).err().unwrap();
        assert!(matches!(err, PlacementError::ArtifactLoad { artifact: "model weights", .. }));
    }

    #[test]
    fn test_corrupt_config_is_artifact_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("dnn_model.json"), "{ not json").unwrap();
        assert!(matches!(store.load_config(), Err(PlacementError::ArtifactLoad { .. })));

        fs::write(dir.path().join("dnn_model.json"), r#"{"input_dim": 0, "hidden_dims": []}"#).unwrap();
        assert!(store.load_config().is_err());
    }
}
