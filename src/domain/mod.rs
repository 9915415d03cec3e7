// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that define what the system is
// about: an applicant, the form that collects one, the verdict
// produced for one, and the seams to the two model artifacts.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only structs, enums, traits and pure functions

/// The applicant record and its closed field domains
pub mod candidate;

/// Declarative descriptors for the twelve form fields
pub mod form_schema;

/// Probability, threshold and verdict
pub mod prediction;

/// Typed errors shared by every layer
pub mod error;

/// Seams to the transformer and classifier artifacts
pub mod traits;
