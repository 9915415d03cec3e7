// ============================================================
// Layer 6 — Model Metadata
// ============================================================
// `meta.json` travels with the model and carries the decision
// threshold chosen at training time, e.g.
//
//   { "threshold": 0.5, "model_name": "placement_dnn", "trained_at": "2026-03-02" }
//
// Only `threshold` is required; unknown keys are ignored so the
// training side can add fields without breaking this loader.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::domain::error::PlacementError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Probability cutoff in [0, 1]; ties count as Placed
    pub threshold: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
}

impl ModelMeta {
    pub fn load(path: &Path) -> Result<Self, PlacementError> {
        let json = fs::read_to_string(path)
            .map_err(|e| PlacementError::artifact("metadata", path, e))?;
        let meta: Self = serde_json::from_str(&json)
            .map_err(|e| PlacementError::artifact("metadata", path, e))?;

        if !meta.threshold.is_finite() || !(0.0..=1.0).contains(&meta.threshold) {
            return Err(PlacementError::artifact(
                "metadata",
                path,
                format!("threshold {} is outside [0, 1]", meta.threshold),
            ));
        }
        Ok(meta)
    }
}
