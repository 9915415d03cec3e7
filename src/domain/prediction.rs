// ============================================================
// Layer 3 — Prediction Result
// ============================================================
// The scalar model output, the cutoff it was compared against,
// and the resulting verdict.
//
// Decision rule: probability >= threshold → Placed.
// The lower bound is closed, so a tie counts as Placed.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Placed,
    #[serde(rename = "Not Placed")]
    NotPlaced,
}

impl Verdict {
    pub fn decide(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Self::Placed
        } else {
            Self::NotPlaced
        }
    }

    /// Banner text shown under the metric.
    pub fn banner(self) -> &'static str {
        match self {
            Self::Placed    => "✅ Student is likely to be PLACED",
            Self::NotPlaced => "❌ Student is likely to be NOT PLACED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Placed    => "Placed",
            Self::NotPlaced => "Not Placed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Model output in [0, 1]
    pub probability: f64,
    pub threshold:   f64,
    pub verdict:     Verdict,
}

impl Prediction {
    pub fn new(probability: f64, threshold: f64) -> Self {
        Self { probability, threshold, verdict: Verdict::decide(probability, threshold) }
    }

    /// Probability as a two-decimal percentage, e.g. "63.00%".
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}
