// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the artifacts directory:
//
//   artifacts.rs  — loads and cross-checks the three artifacts,
//                   and memoizes them for the process lifetime
//
//   checkpoint.rs — rebuilds the DNN from its JSON config and
//                   loads its burn weight record
//
//   meta.rs       — reads meta.json and validates the threshold
//
// Every failure here is an ArtifactLoad error, which the CLI
// treats as fatal.

/// Memoized artifact loading
pub mod artifacts;

/// Model config + weights
pub mod checkpoint;

/// Threshold metadata
pub mod meta;
