// ============================================================
// Layer 4 — Fitted Preprocessor
// ============================================================
// Turns a Candidate Record into the numeric feature vector the
// classifier was trained on. All parameters were fitted upstream
// and arrive as `artifacts/preprocessor.json`; nothing here learns.
//
// The artifact is an ordered list of column steps. The output is
// the concatenation of every step's output, in step order:
//
//   standard_scaler  → (x - mean) / scale        1 feature per column
//   one_hot          → indicator per category    k (or k-1) per column
//   passthrough      → x unchanged               1 feature per column
//
// Example artifact:
//   {
//     "steps": [
//       { "kind": "standard_scaler", "columns": ["ssc_p", "mba_p"],
//         "mean": [67.3, 62.3], "scale": [10.8, 5.8] },
//       { "kind": "one_hot", "columns": ["gender"],
//         "categories": [["F", "M"]], "drop": "if_binary" }
//     ]
//   }
//
// Unknown categories are an error: a record the encoder cannot
// represent must not be silently zero-encoded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::candidate::{CandidateRecord, FieldValue};
use crate::domain::error::TransformError;
use crate::domain::traits::FeatureTransformer;

/// Which category column, if any, the one-hot step leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// Drop the first category of every column
    First,
    /// Drop the first category only for two-category columns
    IfBinary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStep {
    StandardScaler {
        columns: Vec<String>,
        mean:    Vec<f64>,
        scale:   Vec<f64>,
    },
    OneHot {
        columns:    Vec<String>,
        categories: Vec<Vec<String>>,
        #[serde(default)]
        drop:       Option<DropPolicy>,
    },
    Passthrough {
        columns: Vec<String>,
    },
}

impl ColumnStep {
    fn columns(&self) -> &[String] {
        match self {
            Self::StandardScaler { columns, .. }
            | Self::OneHot { columns, .. }
            | Self::Passthrough { columns } => columns,
        }
    }

    fn output_dim(&self) -> usize {
        match self {
            Self::StandardScaler { columns, .. } | Self::Passthrough { columns } => columns.len(),
            Self::OneHot { categories, drop, .. } => categories
                .iter()
                .map(|cats| cats.len() - dropped_index(*drop, cats.len()).map_or(0, |_| 1))
                .sum(),
        }
    }
}

/// Index of the category left out for a column with `n` categories.
fn dropped_index(drop: Option<DropPolicy>, n: usize) -> Option<usize> {
    match drop {
        Some(DropPolicy::First)              => Some(0),
        Some(DropPolicy::IfBinary) if n == 2 => Some(0),
        _                                    => None,
    }
}

/// The loaded, validated transformer artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    steps: Vec<ColumnStep>,
}

impl FittedPreprocessor {
    /// Build from steps, checking that the fitted parameters are
    /// internally consistent. Returns a description of the first
    /// inconsistency found.
    pub fn new(steps: Vec<ColumnStep>) -> Result<Self, String> {
        let p = Self { steps };
        p.validate()?;
        Ok(p)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let raw: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Self::new(raw.steps)
    }

    pub fn steps(&self) -> &[ColumnStep] {
        &self.steps
    }

    fn validate(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err("preprocessor has no steps".to_string());
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            for col in step.columns() {
                if !seen.insert(col.as_str()) {
                    return Err(format!("column '{col}' is encoded twice"));
                }
            }

            match step {
                ColumnStep::StandardScaler { columns, mean, scale } => {
                    if mean.len() != columns.len() || scale.len() != columns.len() {
                        return Err(format!(
                            "standard_scaler has {} columns but {} means and {} scales",
                            columns.len(), mean.len(), scale.len()
                        ));
                    }
                    if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
                        return Err(format!("scale for '{}' must be finite and non-zero", columns[i]));
                    }
                    if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
                        return Err(format!("mean for '{}' is not finite", columns[i]));
                    }
                }
                ColumnStep::OneHot { columns, categories, .. } => {
                    if categories.len() != columns.len() {
                        return Err(format!(
                            "one_hot has {} columns but {} category lists",
                            columns.len(), categories.len()
                        ));
                    }
                    if let Some(i) = categories.iter().position(Vec::is_empty) {
                        return Err(format!("one_hot column '{}' has no categories", columns[i]));
                    }
                }
                ColumnStep::Passthrough { .. } => {}
            }
        }
        Ok(())
    }
}

fn lookup<'r>(
    row:    &'r [(&'static str, FieldValue)],
    column: &str,
) -> Result<&'r FieldValue, TransformError> {
    row.iter()
        .find(|(name, _)| *name == column)
        .map(|(_, v)| v)
        .ok_or_else(|| TransformError::MissingColumn(column.to_string()))
}

fn numeric(row: &[(&'static str, FieldValue)], column: &str) -> Result<f64, TransformError> {
    match lookup(row, column)? {
        FieldValue::Number(v) if v.is_finite() => Ok(*v),
        FieldValue::Number(_) => Err(TransformError::NonFinite { column: column.to_string() }),
        FieldValue::Text(_) => Err(TransformError::KindMismatch {
            column:   column.to_string(),
            expected: "numeric",
        }),
    }
}

fn categorical(
    row:    &[(&'static str, FieldValue)],
    column: &str,
) -> Result<&'static str, TransformError> {
    match lookup(row, column)? {
        FieldValue::Text(s) => Ok(*s),
        FieldValue::Number(_) => Err(TransformError::KindMismatch {
            column:   column.to_string(),
            expected: "categorical",
        }),
    }
}

impl FittedPreprocessor {
    /// Encode an already-built row. Exposed separately from the
    /// trait so rows with missing or mistyped cells can be checked.
    pub fn transform_row(
        &self,
        row: &[(&'static str, FieldValue)],
    ) -> Result<Vec<f32>, TransformError> {
        let mut out = Vec::with_capacity(self.output_dim());

        for step in &self.steps {
            match step {
                ColumnStep::StandardScaler { columns, mean, scale } => {
                    for ((col, m), s) in columns.iter().zip(mean).zip(scale) {
                        let x = numeric(row, col)?;
                        out.push(((x - m) / s) as f32);
                    }
                }
                ColumnStep::OneHot { columns, categories, drop } => {
                    for (col, cats) in columns.iter().zip(categories) {
                        let value = categorical(row, col)?;
                        let hit = cats.iter().position(|c| c == value).ok_or_else(|| {
                            TransformError::UnknownCategory {
                                column: col.clone(),
                                value:  value.to_string(),
                            }
                        })?;
                        let skip = dropped_index(*drop, cats.len());
                        for i in (0..cats.len()).filter(|i| Some(*i) != skip) {
                            out.push(if i == hit { 1.0 } else { 0.0 });
                        }
                    }
                }
                ColumnStep::Passthrough { columns } => {
                    for col in columns {
                        out.push(numeric(row, col)? as f32);
                    }
                }
            }
        }

        debug_assert_eq!(out.len(), self.output_dim());
        Ok(out)
    }
}

impl FeatureTransformer for FittedPreprocessor {
    fn output_dim(&self) -> usize {
        self.steps.iter().map(ColumnStep::output_dim).sum()
    }

    fn transform(&self, record: &CandidateRecord) -> Result<Vec<f32>, TransformError> {
        let features = self.transform_row(&record.to_row())?;
        tracing::debug!("Encoded record into {} features", features.len());
        Ok(features)
    }
}
