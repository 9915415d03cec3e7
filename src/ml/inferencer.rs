// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Wraps the loaded PlacementDnn behind the PlacementClassifier
// seam: one feature row in, one probability out.
use std::sync::Mutex;

use burn::{prelude::*, tensor::TensorData};

use crate::domain::error::PlacementError;
use crate::domain::traits::PlacementClassifier;
use crate::infra::checkpoint::ModelStore;
use crate::ml::model::{PlacementDnn, PlacementDnnConfig};

pub type InferBackend = burn::backend::NdArray;

pub struct Inferencer {
    // burn modules are Send but not Sync; the lock only exists so a
    // loaded model can sit in a process-wide static. Never mutated.
    model:  Mutex<PlacementDnn<InferBackend>>,
    config: PlacementDnnConfig,
    device: <InferBackend as Backend>::Device,
}

impl Inferencer {
    pub fn from_checkpoint(store: &ModelStore) -> Result<Self, PlacementError> {
        let device = Default::default();
        let config = store.load_config()?;
        let model: PlacementDnn<InferBackend> = config.init(&device);
        let model = store.load_model(model, &device)?;
        tracing::info!(
            "Model loaded: {} inputs, hidden layers {:?}",
            config.input_dim,
            config.hidden_dims
        );
        Ok(Self::from_model(model, config, device))
    }

    pub fn from_model(
        model:  PlacementDnn<InferBackend>,
        config: PlacementDnnConfig,
        device: <InferBackend as Backend>::Device,
    ) -> Self {
        Self { model: Mutex::new(model), config, device }
    }

    pub fn config(&self) -> &PlacementDnnConfig {
        &self.config
    }
}

impl PlacementClassifier for Inferencer {
    fn input_dim(&self) -> usize {
        self.config.input_dim
    }

    fn predict_proba(&self, features: &[f32]) -> Result<f64, PlacementError> {
        if features.len() != self.config.input_dim {
            return Err(PlacementError::Inference(format!(
                "expected {} features, got {}",
                self.config.input_dim,
                features.len()
            )));
        }

        let input = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(features.to_vec(), [1, features.len()]),
            &self.device,
        );

        let output = {
            let model = self
                .model
                .lock()
                .map_err(|_| PlacementError::Inference("model lock poisoned".to_string()))?;
            model.forward(input)
        };

        let values = output
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| PlacementError::Inference(format!("unreadable model output: {e:?}")))?;

        let probability = match values.as_slice() {
            [p] => f64::from(*p),
            other => {
                return Err(PlacementError::Inference(format!(
                    "expected a single output, got {}",
                    other.len()
                )))
            }
        };

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PlacementError::Inference(format!(
                "probability {probability} is outside [0, 1]"
            )));
        }

        tracing::debug!("Model probability {:.4}", probability);
        Ok(probability)
    }
}
