// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn model code lives here. Other layers see the model only
// through domain::traits::PlacementClassifier.
//
//   model.rs      — dense ReLU network with a sigmoid head
//   inferencer.rs — loaded model behind the classifier trait
//
// Inference runs on the CPU ndarray backend: one row per
// submission does not need a GPU.

/// Placement DNN architecture
pub mod model;

/// Loaded model → probability
pub mod inferencer;
