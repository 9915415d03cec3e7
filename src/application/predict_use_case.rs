// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// One record in, one verdict out, synchronously:
//
//   Step 1: Transform  record → feature vector     (Layer 4 - data)
//   Step 2: Infer      features → probability      (Layer 5 - ml)
//   Step 3: Decide     probability >= threshold    (Layer 3 - domain)
//
// Rendering is Layer 1's job. No retries, no caching of results,
// and no state carried from one call to the next.

use crate::domain::candidate::CandidateRecord;
use crate::domain::error::PlacementError;
use crate::domain::prediction::Prediction;
use crate::domain::traits::{FeatureTransformer, PlacementClassifier};
use crate::infra::artifacts::Artifacts;

pub struct PredictUseCase<'a> {
    transformer: &'a dyn FeatureTransformer,
    classifier:  &'a dyn PlacementClassifier,
    threshold:   f64,
}

impl<'a> PredictUseCase<'a> {
    pub fn new(
        transformer: &'a dyn FeatureTransformer,
        classifier:  &'a dyn PlacementClassifier,
        threshold:   f64,
    ) -> Self {
        Self { transformer, classifier, threshold }
    }

    /// Wire the use case to loaded artifacts.
    pub fn from_artifacts(artifacts: &'a Artifacts) -> Self {
        Self::new(&artifacts.preprocessor, &artifacts.model, artifacts.meta.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn predict(&self, record: &CandidateRecord) -> Result<Prediction, PlacementError> {
        let features = self.transformer.transform(record)?;

        let probability = self.classifier.predict_proba(&features)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(PlacementError::Inference(format!(
                "classifier returned {probability}, outside [0, 1]"
            )));
        }

        let prediction = Prediction::new(probability, self.threshold);
        tracing::info!(
            "Prediction: p={:.4} threshold={:.3} verdict={}",
            prediction.probability,
            prediction.threshold,
            prediction.verdict
        );
        Ok(prediction)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::preprocessor::tests::fitted;
    use crate::domain::candidate::tests::sample_record;
    use crate::domain::candidate::Specialisation;
    use crate::domain::error::TransformError;
    use crate::domain::prediction::Verdict;
    use crate::infra::artifacts::{tests::write_artifacts, ArtifactCache, ArtifactPaths};
    use crate::ml::inferencer::tests::random_inferencer;

    /// Classifier that ignores its input and returns a fixed value.
    pub(crate) struct FixedProbability(pub f64);

    impl PlacementClassifier for FixedProbability {
        fn input_dim(&self) -> usize {
            21
        }

        fn predict_proba(&self, _features: &[f32]) -> Result<f64, PlacementError> {
            Ok(self.0)
        }
    }

    /// Transformer that rejects every record.
    pub(crate) struct RejectAll;

    impl FeatureTransformer for RejectAll {
        fn output_dim(&self) -> usize {
            21
        }

        fn transform(&self, _record: &CandidateRecord) -> Result<Vec<f32>, TransformError> {
            Err(TransformError::UnknownCategory { column: "hsc_s".into(), value: "Arts".into() })
        }
    }

    #[test]
    fn test_scenario_placed_at_half() {
        let pre = fitted();
        let clf = FixedProbability(0.63);
        let p = PredictUseCase::new(&pre, &clf, 0.5).predict(&sample_record()).unwrap();
        assert_eq!(p.verdict, Verdict::Placed);
        assert_eq!(p.percentage(), "63.00%");
    }

    #[test]
    fn test_scenario_not_placed_at_seventy() {
        let pre = fitted();
        let clf = FixedProbability(0.63);
        let p = PredictUseCase::new(&pre, &clf, 0.70).predict(&sample_record()).unwrap();
        assert_eq!(p.verdict, Verdict::NotPlaced);
    }

    #[test]
    fn test_probability_equal_to_threshold_is_placed() {
        let pre = fitted();
        let clf = FixedProbability(0.5);
        let p = PredictUseCase::new(&pre, &clf, 0.5).predict(&sample_record()).unwrap();
        assert_eq!(p.verdict, Verdict::Placed);
    }

    #[test]
    fn test_transform_failure_is_not_a_verdict() {
        let clf = FixedProbability(0.1);
        let err = PredictUseCase::new(&RejectAll, &clf, 0.5)
            .predict(&sample_record())
            .unwrap_err();
        assert!(matches!(err, PlacementError::Transform(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_out_of_range_classifier_output_is_rejected() {
        let pre = fitted();
        for bad in [1.2, -0.1, f64::NAN] {
            let clf = FixedProbability(bad);
            let err = PredictUseCase::new(&pre, &clf, 0.5).predict(&sample_record()).unwrap_err();
            assert!(matches!(err, PlacementError::Inference(_)));
        }
    }

    #[test]
    fn test_real_model_is_bounded_and_repeatable() {
        let pre = fitted();
        let clf = random_inferencer(21);
        let uc  = PredictUseCase::new(&pre, &clf, 0.5);

        let mut record = sample_record();
        let first  = uc.predict(&record).unwrap();
        let second = uc.predict(&record).unwrap();
        assert!((0.0..=1.0).contains(&first.probability));
        assert_eq!(first, second);

        record.specialisation = Specialisation::MktFin;
        let other = uc.predict(&record).unwrap();
        assert!((0.0..=1.0).contains(&other.probability));
    }

    #[test]
    fn test_from_loaded_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), 0.25);
        let cache = ArtifactCache::new();
        let artifacts = cache.get_or_load(&ArtifactPaths::in_dir(dir.path())).unwrap();

        let uc = PredictUseCase::from_artifacts(artifacts);
        assert_eq!(uc.threshold(), 0.25);
        let p = uc.predict(&sample_record()).unwrap();
        assert_eq!(p.verdict, Verdict::decide(p.probability, 0.25));
    }
}
