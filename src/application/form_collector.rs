// ============================================================
// Layer 2 — Form Collector
// ============================================================
// Holds the current value of every form field and turns them into
// a Candidate Record on submit.
//
//   FormState::new()   → every field at its declared default
//   set(name, raw)     → validate one input against its descriptor
//   submit()           → exactly one CandidateRecord
//
// Values are stored already parsed, exactly as entered: scores are
// never rounded here, only formatted for display by the renderer.
// Nothing downstream runs until submit() is called.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};

use crate::domain::candidate::{CandidateRecord, Categorical, Percentage};
use crate::domain::error::FieldError;
use crate::domain::form_schema::{descriptor, FieldDescriptor, FieldKind, PLACEMENT_FORM};

/// A validated field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormValue {
    Choice(&'static str),
    Score(Percentage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: HashMap<&'static str, FormValue>,
}

impl FormState {
    pub fn new() -> Self {
        let values = PLACEMENT_FORM
            .iter()
            .filter_map(|d| validate(d, &d.default_input()).ok().map(|v| (d.name, v)))
            .collect();
        Self { values }
    }

    /// Validate `raw` for field `name` and store it.
    /// Rejected input leaves the previous value in place.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        let d = descriptor(name).ok_or_else(|| FieldError::UnknownField(name.to_string()))?;
        let value = validate(d, raw)?;
        self.values.insert(d.name, value);
        Ok(())
    }

    /// Current value of a field.
    pub fn value(&self, name: &str) -> Option<FormValue> {
        self.values.get(name).copied()
    }

    /// Assemble the record from the current values.
    pub fn submit(&self) -> Result<CandidateRecord> {
        let record = CandidateRecord {
            gender:         self.choice("gender")?,
            ssc_p:          self.score("ssc_p")?,
            ssc_b:          self.choice("ssc_b")?,
            hsc_p:          self.score("hsc_p")?,
            hsc_b:          self.choice("hsc_b")?,
            hsc_s:          self.choice("hsc_s")?,
            degree_p:       self.score("degree_p")?,
            degree_t:       self.choice("degree_t")?,
            workex:         self.choice("workex")?,
            etest_p:        self.score("etest_p")?,
            specialisation: self.choice("specialisation")?,
            mba_p:          self.score("mba_p")?,
        };
        tracing::debug!("Form submitted: {:?}", record);
        Ok(record)
    }

    fn current(&self, name: &str) -> Result<FormValue> {
        self.value(name)
            .with_context(|| format!("form has no value for '{name}'"))
    }

    fn choice<C: Categorical>(&self, name: &str) -> Result<C> {
        match self.current(name)? {
            FormValue::Choice(label) => {
                C::parse_label(label).with_context(|| format!("field '{name}'"))
            }
            FormValue::Score(_) => bail!("field '{name}' holds a score, expected a choice"),
        }
    }

    fn score(&self, name: &str) -> Result<Percentage> {
        match self.current(name)? {
            FormValue::Score(p) => Ok(p),
            FormValue::Choice(_) => bail!("field '{name}' holds a choice, expected a score"),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Check raw input against a descriptor and parse it.
pub fn validate(d: &FieldDescriptor, raw: &str) -> Result<FormValue, FieldError> {
    let raw = raw.trim();
    match d.kind {
        FieldKind::Choice { options } => options
            .iter()
            .find(|o| **o == raw)
            .map(|o| FormValue::Choice(*o))
            .ok_or_else(|| FieldError::InvalidChoice { value: raw.to_string(), options }),
        FieldKind::Number { min, max, .. } => {
            let v: f64 = raw.parse().map_err(|_| FieldError::NotANumber(raw.to_string()))?;
            if !v.is_finite() || v < min || v > max {
                return Err(FieldError::OutOfRange { value: v, min, max });
            }
            Ok(FormValue::Score(Percentage::new(v)?))
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::tests::sample_record;
    use crate::domain::candidate::{Gender, WorkExperience};

    #[test]
    fn test_defaults_build_a_record() {
        let r = FormState::new().submit().unwrap();
        assert_eq!(r.gender, Gender::Male);
        assert_eq!(r.workex, WorkExperience::Yes);
        assert_eq!(r.ssc_p.value(), 70.0);
        assert_eq!(r.etest_p.value(), 75.0);
        assert_eq!(r.mba_p.value(), 62.0);
    }

    #[test]
    fn test_scenario_inputs_match_sample_record() {
        let mut form = FormState::new();
        form.set("workex", "No").unwrap();
        assert_eq!(form.submit().unwrap(), sample_record());
    }

    #[test]
    fn test_bounds_accepted_without_clamping() {
        let mut form = FormState::new();
        form.set("ssc_p", "0").unwrap();
        form.set("mba_p", "100.0").unwrap();
        let r = form.submit().unwrap();
        assert_eq!(r.ssc_p.value(), 0.0);
        assert_eq!(r.mba_p.value(), 100.0);
    }

    #[test]
    fn test_scores_are_kept_exactly_as_entered() {
        let mut form = FormState::new();
        form.set("ssc_p", "70.006").unwrap();
        form.set("hsc_p", "99.999").unwrap();
        form.set("mba_p", "-0").unwrap();
        let r = form.submit().unwrap();
        assert_eq!(r.ssc_p.value(), 70.006);
        assert_eq!(r.hsc_p.value(), 99.999);
        assert_eq!(r.mba_p.value(), 0.0);
        assert!(r.mba_p.value().is_sign_positive());
    }

    #[test]
    fn test_rejected_input_keeps_previous_value() {
        let mut form = FormState::new();
        assert!(matches!(form.set("hsc_p", "100.5"), Err(FieldError::OutOfRange { .. })));
        assert!(matches!(form.set("hsc_p", "high"), Err(FieldError::NotANumber(_))));
        assert!(matches!(form.set("gender", "X"), Err(FieldError::InvalidChoice { .. })));
        assert!(matches!(form.set("age", "21"), Err(FieldError::UnknownField(_))));
        assert_eq!(form.value("hsc_p"), Some(FormValue::Score(Percentage::new(70.0).unwrap())));
        assert_eq!(form.value("gender"), Some(FormValue::Choice("M")));
    }

    #[test]
    fn test_choice_input_is_trimmed_and_exact() {
        let mut form = FormState::new();
        form.set("degree_t", "  Comm&Mgmt ").unwrap();
        assert_eq!(form.value("degree_t"), Some(FormValue::Choice("Comm&Mgmt")));
        assert!(form.set("degree_t", "comm&mgmt").is_err());
    }
}
