// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination between the form and the artifacts.
//
// Rules for this layer:
//   - No model math here (that's Layer 5)
//   - No printing or prompting here (that's Layer 1)
//   - No file access here (that's Layer 6)

// Current form values → one Candidate Record
pub mod form_collector;

// Candidate Record → probability → verdict
pub mod predict_use_case;
