// ============================================================
// Layer 3 — Form Schema
// ============================================================
// The placement form as data: a static list of field
// descriptors that any renderer can walk without per-field code.
//
//   Choice  → closed set of labels, default = first listed
//   Number  → (min, max, default), both bounds inclusive
//
// Choice options come straight from the Categorical enums so the
// form can never offer a label the record type cannot hold.

use crate::domain::candidate::{
    Board, Categorical, DegreeType, Gender, HscStream, Percentage, Specialisation,
    WorkExperience,
};

pub const TITLE: &str = "🎓 Campus Placement Prediction System";
pub const DESCRIPTION: &str = "This application predicts whether a student will be placed \
                               based on academic and skill-related attributes.";
pub const SUBMIT_LABEL: &str = "Predict Placement";

pub const SECTION_DETAILS: &str = "Personal & Academic Details";
pub const SECTION_SCORES: &str = "Scores (in percentage)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Choice { options: &'static [&'static str] },
    Number { min: f64, max: f64, default: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Column name in the structured row
    pub name:    &'static str,
    /// Human label shown next to the input
    pub label:   &'static str,
    pub section: &'static str,
    pub kind:    FieldKind,
}

impl FieldDescriptor {
    const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self { name, label, section: SECTION_DETAILS, kind: FieldKind::Choice { options } }
    }

    const fn score(name: &'static str, label: &'static str, default: f64) -> Self {
        Self {
            name,
            label,
            section: SECTION_SCORES,
            kind: FieldKind::Number { min: Percentage::MIN, max: Percentage::MAX, default },
        }
    }

    /// Default as the raw text a user would type.
    pub fn default_input(&self) -> String {
        match self.kind {
            FieldKind::Choice { options } => options.first().copied().unwrap_or_default().to_string(),
            FieldKind::Number { default, .. } => default.to_string(),
        }
    }
}

/// Render order: the categorical block first, then the scores.
pub static PLACEMENT_FORM: [FieldDescriptor; 12] = [
    FieldDescriptor::choice("gender",         "Gender",             Gender::LABELS),
    FieldDescriptor::choice("ssc_b",          "SSC Board",          Board::LABELS),
    FieldDescriptor::choice("hsc_b",          "HSC Board",          Board::LABELS),
    FieldDescriptor::choice("workex",         "Work Experience",    WorkExperience::LABELS),
    FieldDescriptor::choice("hsc_s",          "HSC Stream",         HscStream::LABELS),
    FieldDescriptor::choice("degree_t",       "Degree Type",        DegreeType::LABELS),
    FieldDescriptor::choice("specialisation", "MBA Specialisation", Specialisation::LABELS),
    FieldDescriptor::score("ssc_p",    "SSC Percentage",                70.0),
    FieldDescriptor::score("hsc_p",    "HSC Percentage",                70.0),
    FieldDescriptor::score("degree_p", "Degree Percentage",             65.0),
    FieldDescriptor::score("etest_p",  "Employability Test Percentage", 75.0),
    FieldDescriptor::score("mba_p",    "MBA Percentage",                62.0),
];

pub fn descriptor(name: &str) -> Option<&'static FieldDescriptor> {
    PLACEMENT_FORM.iter().find(|d| d.name == name)
}
