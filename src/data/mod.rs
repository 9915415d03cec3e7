// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Candidate Record → structured row → feature vector.
//
//   CandidateRecord::to_row()   (domain)
//       │
//       ▼
//   FittedPreprocessor          scale numerics, one-hot categories
//       │
//       ▼
//   Vec<f32> of fixed width     → ml::inferencer

/// Fitted column transformer loaded from the artifacts directory
pub mod preprocessor;
