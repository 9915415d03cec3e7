// ============================================================
// Layer 1 — Terminal Form
// ============================================================
// Renders the placement form as a single page in the terminal,
// driven entirely by the static field descriptors:
//
//   title + description
//   section header, then one prompt per field
//     Choice → "Gender [M / F] (M): "
//     Number → "SSC Percentage [0.00..100.00] (70.00): "
//   submit action
//   result: metric + success/failure banner
//
// An empty answer keeps the current value; an invalid one is
// reported and asked again. Values survive between submissions,
// so a second run only needs the fields that change.
//
// Generic over BufRead/Write so whole sessions can be scripted.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::application::form_collector::{FormState, FormValue};
use crate::application::predict_use_case::PredictUseCase;
use crate::domain::form_schema::{
    FieldDescriptor, FieldKind, DESCRIPTION, PLACEMENT_FORM, SUBMIT_LABEL, TITLE,
};
use crate::domain::prediction::Prediction;

pub struct FormSession<R, W> {
    input:  R,
    output: W,
    form:   FormState,
}

impl<R: BufRead, W: Write> FormSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, form: FormState::new() }
    }

    /// Run until the user quits or input ends.
    /// Returns the number of predictions rendered.
    pub fn run(&mut self, use_case: &PredictUseCase<'_>) -> Result<usize> {
        writeln!(self.output, "{TITLE}")?;
        writeln!(self.output, "{DESCRIPTION}")?;

        let mut rendered = 0;
        loop {
            if !self.fill_fields()? || !self.confirm_submit()? {
                return Ok(rendered);
            }

            // Submission event: the only place downstream work starts
            let record = self.form.submit()?;
            writeln!(self.output, "\nPrediction Result")?;
            match use_case.predict(&record) {
                Ok(prediction) => {
                    self.render(&prediction)?;
                    rendered += 1;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Prediction failed: {e}");
                    writeln!(self.output, "⚠️  Prediction failed: {e}")?;
                }
                Err(e) => return Err(e.into()),
            }

            if !self.ask_again()? {
                return Ok(rendered);
            }
        }
    }

    /// Prompt for every field. `false` if input ended.
    fn fill_fields(&mut self) -> Result<bool> {
        let mut section = "";
        for d in PLACEMENT_FORM.iter() {
            if d.section != section {
                section = d.section;
                writeln!(self.output, "\n{section}")?;
            }
            if !self.fill_field(d)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn fill_field(&mut self, d: &FieldDescriptor) -> Result<bool> {
        loop {
            let current = self.form.value(d.name).map(shown).unwrap_or_default();
            write!(self.output, "{} {} ({}): ", d.label, bounds(d), current)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            if line.is_empty() {
                return Ok(true);
            }
            match self.form.set(d.name, &line) {
                Ok(()) => return Ok(true),
                Err(e) => writeln!(self.output, "  ✗ {e}")?,
            }
        }
    }

    /// Enter or "y" submits, "q" quits; anything else is asked again.
    fn confirm_submit(&mut self) -> Result<bool> {
        loop {
            write!(self.output, "\n[ {SUBMIT_LABEL} ] Enter to submit, q to quit: ")?;
            self.output.flush()?;
            match self.read_line()? {
                None => return Ok(false),
                Some(l) if l.is_empty() || l.eq_ignore_ascii_case("y") => return Ok(true),
                Some(l) if l.eq_ignore_ascii_case("q") => return Ok(false),
                Some(l) => writeln!(self.output, "  ✗ '{l}': press Enter to submit or q to quit")?,
            }
        }
    }

    fn ask_again(&mut self) -> Result<bool> {
        write!(self.output, "\nSubmit another? [y/N]: ")?;
        self.output.flush()?;
        Ok(matches!(self.read_line()?, Some(l) if l.eq_ignore_ascii_case("y")))
    }

    fn render(&mut self, p: &Prediction) -> Result<()> {
        writeln!(self.output, "Placement Probability: {}", p.percentage())?;
        writeln!(self.output, "{}", p.verdict.banner())?;
        Ok(())
    }

    /// Trimmed next line, or None at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

/// Scores are shown to two decimals; the stored value is not rounded.
fn shown(v: FormValue) -> String {
    match v {
        FormValue::Choice(label) => label.to_string(),
        FormValue::Score(p) => format!("{:.2}", p.value()),
    }
}

fn bounds(d: &FieldDescriptor) -> String {
    match d.kind {
        FieldKind::Choice { options } => format!("[{}]", options.join(" / ")),
        FieldKind::Number { min, max, .. } => format!("[{min:.2}..{max:.2}]"),
    }
}
