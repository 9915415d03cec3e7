// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Typed errors for the three failure families of a prediction:
//
//   ArtifactLoad — a file in the artifacts directory is missing,
//                  corrupt, or incompatible with its siblings.
//                  Fatal: the process cannot serve any prediction.
//
//   Transform    — a record value is outside what the fitted
//                  preprocessor knows. Rendered as an explicit
//                  error state, never as "Not Placed".
//
//   Inference    — the model contract was broken (wrong feature
//                  width, non-finite output). Fatal.
//
// FieldError is separate: it belongs to form input, before any
// record exists, and never reaches the predictor.

use std::path::PathBuf;

/// Failure of the load → transform → infer pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("failed to load {artifact} from '{path}': {reason}")]
    ArtifactLoad {
        artifact: &'static str,
        path:     PathBuf,
        reason:   String,
    },

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl PlacementError {
    pub fn artifact(
        artifact: &'static str,
        path:     impl Into<PathBuf>,
        reason:   impl std::fmt::Display,
    ) -> Self {
        Self::ArtifactLoad {
            artifact,
            path:   path.into(),
            reason: reason.to_string(),
        }
    }

    /// Only transform failures are survivable inside a session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transform(_))
    }
}

/// A record value the fitted preprocessor cannot encode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("column '{0}' is missing from the record")]
    MissingColumn(String),

    #[error("column '{column}' expected a {expected} value")]
    KindMismatch {
        column:   String,
        expected: &'static str,
    },

    #[error("column '{column}' has unknown category '{value}'")]
    UnknownCategory {
        column: String,
        value:  String,
    },

    #[error("column '{column}' is not a finite number")]
    NonFinite { column: String },
}

/// Raw form input rejected against its field descriptor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{value}' is not one of {options:?}")]
    InvalidChoice {
        value:   String,
        options: &'static [&'static str],
    },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is outside [{min}, {max}]")]
    OutOfRange {
        value: f64,
        min:   f64,
        max:   f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transform_errors_are_recoverable() {
        let t = PlacementError::from(TransformError::MissingColumn("gender".into()));
        assert!(t.is_recoverable());

        let i = PlacementError::Inference("shape".into());
        assert!(!i.is_recoverable());

        let a = PlacementError::artifact("metadata", "artifacts/meta.json", "missing");
        assert!(!a.is_recoverable());
        assert!(a.to_string().contains("artifacts/meta.json"));
    }
}
