// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, loads the artifacts through the process-wide cache, and
// hands control to the terminal form or the inspector.
//
// An artifact failure surfaces here as an error and ends the
// process; nothing is retried.

pub mod commands;
pub mod form;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::application::predict_use_case::PredictUseCase;
use crate::data::preprocessor::ColumnStep;
use crate::domain::traits::FeatureTransformer;
use crate::infra::artifacts::{artifacts, ArtifactPaths, Artifacts, DEFAULT_ARTIFACTS_DIR};
use commands::{Commands, InspectArgs};
use form::FormSession;

#[derive(Parser, Debug)]
#[command(
    name = "placement-predictor",
    version,
    about = "Predict campus placement from academic and demographic attributes."
)]
pub struct Cli {
    /// Directory holding preprocessor.json, dnn_model.{json,mpk} and meta.json
    #[arg(long, global = true, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Defaults to `form`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = ArtifactPaths::in_dir(&self.artifacts_dir);
        let loaded = artifacts(&paths).with_context(|| {
            format!("Cannot start without artifacts in '{}'", self.artifacts_dir.display())
        })?;

        match self.command.unwrap_or(Commands::Form) {
            Commands::Form          => run_form(loaded),
            Commands::Inspect(args) => run_inspect(loaded, &args),
        }
    }
}

fn run_form(loaded: &Artifacts) -> Result<()> {
    let use_case = PredictUseCase::from_artifacts(loaded);
    tracing::info!("Form ready, placement threshold {:.3}", use_case.threshold());
    let stdin    = io::stdin();
    let mut session = FormSession::new(stdin.lock(), io::stdout());
    let count = session.run(&use_case)?;
    tracing::info!("Session ended after {} prediction(s)", count);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ArtifactSummary<'a> {
    features:    usize,
    steps:       Vec<String>,
    hidden_dims: &'a [usize],
    threshold:   f64,
    model_name:  Option<&'a str>,
    trained_at:  Option<&'a str>,
}

impl<'a> ArtifactSummary<'a> {
    fn of(a: &'a Artifacts) -> Self {
        let steps = a
            .preprocessor
            .steps()
            .iter()
            .map(|s| match s {
                ColumnStep::StandardScaler { columns, .. } => format!("standard_scaler({})", columns.join(", ")),
                ColumnStep::OneHot { columns, .. }         => format!("one_hot({})", columns.join(", ")),
                ColumnStep::Passthrough { columns }        => format!("passthrough({})", columns.join(", ")),
            })
            .collect();
        Self {
            features:    a.preprocessor.output_dim(),
            steps,
            hidden_dims: &a.model.config().hidden_dims,
            threshold:   a.meta.threshold,
            model_name:  a.meta.model_name.as_deref(),
            trained_at:  a.meta.trained_at.as_deref(),
        }
    }
}

fn run_inspect(loaded: &Artifacts, args: &InspectArgs) -> Result<()> {
    let summary = ArtifactSummary::of(loaded);
    let mut out = io::stdout().lock();

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    writeln!(out, "Features:      {}", summary.features)?;
    for step in &summary.steps {
        writeln!(out, "  {step}")?;
    }
    writeln!(out, "Hidden layers: {:?}", summary.hidden_dims)?;
    writeln!(out, "Threshold:     {:.3}", summary.threshold)?;
    if let Some(name) = summary.model_name {
        writeln!(out, "Model:         {name}")?;
    }
    if let Some(at) = summary.trained_at {
        writeln!(out, "Trained at:    {at}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::artifacts::{tests::write_artifacts, ArtifactCache};

    #[test]
    fn test_form_is_the_default_command() {
        let cli = Cli::try_parse_from(["placement-predictor"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.artifacts_dir, PathBuf::from("artifacts"));

        let cli = Cli::try_parse_from(["placement-predictor", "inspect", "--json", "--artifacts-dir", "/tmp/a"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Inspect(InspectArgs { json: true })));
        assert_eq!(cli.artifacts_dir, PathBuf::from("/tmp/a"));
    }

    #[test]
    fn test_summary_describes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), 0.6);
        let cache  = ArtifactCache::new();
        let loaded = cache.get_or_load(&ArtifactPaths::in_dir(dir.path())).unwrap();

        let s = ArtifactSummary::of(loaded);
        assert_eq!(s.features, 21);
        assert_eq!(s.hidden_dims, &[16, 8]);
        assert_eq!(s.threshold, 0.6);
        assert_eq!(s.steps.len(), 2);
        assert!(s.steps[1].starts_with("one_hot(gender"));
    }
}
