// ============================================================
// Layer 3 — Candidate Record
// ============================================================
// One applicant's input attributes, exactly as the fitted
// preprocessor saw them at training time.
//
// The domain invariant ("every field present and inside its
// declared domain") is carried by the types:
//   - categorical fields are enums, so an unknown label
//     cannot be represented
//   - percentages are a newtype that only constructs from a
//     finite value in the closed interval [0, 100]
//
// Labels are the literal strings of the training data
// (e.g. "Sci&Tech", "Mkt&HR"); the preprocessor matches on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::FieldError;

/// A closed set of labels with a fixed display order.
/// The first label is the form default.
pub trait Categorical: Sized + Copy + 'static {
    const LABELS: &'static [&'static str];
    const VARIANTS: &'static [Self];

    fn label(&self) -> &'static str;

    fn parse_label(raw: &str) -> Result<Self, FieldError> {
        let raw = raw.trim();
        Self::LABELS
            .iter()
            .position(|l| *l == raw)
            .map(|i| Self::VARIANTS[i])
            .ok_or_else(|| FieldError::InvalidChoice {
                value:   raw.to_string(),
                options: Self::LABELS,
            })
    }
}

macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl Categorical for $name {
            const LABELS: &'static [&'static str] = &[$($label),+];
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_label(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical!(
    /// gender
    Gender { Male => "M", Female => "F" }
);

categorical!(
    /// Board of education for SSC and HSC
    Board { Central => "Central", Others => "Others" }
);

categorical!(
    /// hsc_s
    HscStream { Science => "Science", Commerce => "Commerce", Arts => "Arts" }
);

categorical!(
    /// degree_t
    DegreeType { SciTech => "Sci&Tech", CommMgmt => "Comm&Mgmt", Others => "Others" }
);

categorical!(
    /// workex
    WorkExperience { Yes => "Yes", No => "No" }
);

categorical!(
    /// MBA specialisation
    Specialisation { MktHr => "Mkt&HR", MktFin => "Mkt&Fin" }
);

// ─── Percentage ──────────────────────────────────────────────────────────────

/// A score in the closed interval [0, 100].
/// Both bounds are valid; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Percentage(f64);

impl Percentage {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn new(value: f64) -> Result<Self, FieldError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(FieldError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        // -0.0 + 0.0 == +0.0
        Ok(Self(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Percentage {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let v: f64 = s.parse().map_err(|_| FieldError::NotANumber(s.to_string()))?;
        Self::new(v)
    }
}

// ─── Structured row ──────────────────────────────────────────────────────────

/// A single cell of the structured row handed to the preprocessor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(&'static str),
    Number(f64),
}

/// Column order of the training data frame.
pub const COLUMNS: [&str; 12] = [
    "gender", "ssc_p", "ssc_b", "hsc_p", "hsc_b", "hsc_s",
    "degree_p", "degree_t", "workex", "etest_p", "specialisation", "mba_p",
];

/// One applicant. Built once per form submission, then dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub gender:         Gender,
    pub ssc_p:          Percentage,
    pub ssc_b:          Board,
    pub hsc_p:          Percentage,
    pub hsc_b:          Board,
    pub hsc_s:          HscStream,
    pub degree_p:       Percentage,
    pub degree_t:       DegreeType,
    pub workex:         WorkExperience,
    pub etest_p:        Percentage,
    pub specialisation: Specialisation,
    pub mba_p:          Percentage,
}

impl CandidateRecord {
    /// The record as `(column, value)` pairs in `COLUMNS` order.
    pub fn to_row(&self) -> Vec<(&'static str, FieldValue)> {
        use FieldValue::{Number, Text};
        let cells = [
            Text(self.gender.label()),
            Number(self.ssc_p.value()),
            Text(self.ssc_b.label()),
            Number(self.hsc_p.value()),
            Text(self.hsc_b.label()),
            Text(self.hsc_s.label()),
            Number(self.degree_p.value()),
            Text(self.degree_t.label()),
            Text(self.workex.label()),
            Number(self.etest_p.value()),
            Text(self.specialisation.label()),
            Number(self.mba_p.value()),
        ];
        COLUMNS.into_iter().zip(cells).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The reference applicant used across the crate's tests.
    pub(crate) fn sample_record() -> CandidateRecord {
        CandidateRecord {
            gender:         Gender::Male,
            ssc_p:          Percentage::new(70.0).unwrap(),
            ssc_b:          Board::Central,
            hsc_p:          Percentage::new(70.0).unwrap(),
            hsc_b:          Board::Central,
            hsc_s:          HscStream::Science,
            degree_p:       Percentage::new(65.0).unwrap(),
            degree_t:       DegreeType::SciTech,
            workex:         WorkExperience::No,
            etest_p:        Percentage::new(75.0).unwrap(),
            specialisation: Specialisation::MktHr,
            mba_p:          Percentage::new(62.0).unwrap(),
        }
    }

    #[test]
    fn test_percentage_accepts_bounds() {
        assert_eq!(Percentage::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Percentage::new(100.0).unwrap().value(), 100.0);
        assert!(Percentage::new(-0.0).unwrap().value().is_sign_positive());
    }

    #[test]
    fn test_percentage_rejects_outside_and_nan() {
        assert!(matches!(Percentage::new(100.01), Err(FieldError::OutOfRange { .. })));
        assert!(Percentage::new(-0.5).is_err());
        assert!(Percentage::new(f64::NAN).is_err());
        assert!(matches!("abc".parse::<Percentage>(), Err(FieldError::NotANumber(_))));
    }

    #[test]
    fn test_labels_parse_exactly() {
        assert_eq!("Sci&Tech".parse::<DegreeType>().unwrap(), DegreeType::SciTech);
        assert_eq!(" Mkt&Fin ".parse::<Specialisation>().unwrap(), Specialisation::MktFin);
        // Labels are case sensitive, like the training categories
        assert!("science".parse::<HscStream>().is_err());
    }

    #[test]
    fn test_row_follows_column_order() {
        let row = sample_record().to_row();
        let names: Vec<&str> = row.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, COLUMNS);
        assert_eq!(row[7].1, FieldValue::Text("Sci&Tech"));
        assert_eq!(row[11].1, FieldValue::Number(62.0));
    }
}
