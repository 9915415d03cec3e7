// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two opaque artifacts seen from the application layer.
//
// Both are pure functions once loaded: the same input always
// gives the same output, and nothing is mutated. The predictor
// only sees these traits, so it runs the same against the
// loaded burn model or a fixed-probability stub in tests.
//
//   FeatureTransformer  → data::preprocessor::FittedPreprocessor
//   PlacementClassifier → ml::inferencer::Inferencer

use crate::domain::candidate::CandidateRecord;
use crate::domain::error::{PlacementError, TransformError};

/// Maps a Candidate Record to a fixed-length feature vector.
pub trait FeatureTransformer {
    /// Length of every vector returned by `transform`.
    fn output_dim(&self) -> usize;

    /// Encode one record. Values the fitted transformer does not
    /// know are an error, never silently coerced.
    fn transform(&self, record: &CandidateRecord) -> Result<Vec<f32>, TransformError>;
}

/// Maps a feature vector to a placement probability.
pub trait PlacementClassifier {
    /// Feature width the model was built for.
    fn input_dim(&self) -> usize;

    /// Probability in [0, 1]. A width mismatch or a non-finite
    /// output is `PlacementError::Inference`.
    fn predict_proba(&self, features: &[f32]) -> Result<f64, PlacementError>;
}
