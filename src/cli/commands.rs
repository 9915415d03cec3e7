// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   form     — the interactive placement form (default)
//   inspect  — summary of the loaded artifacts
//
// clap's derive macros generate help text, argument errors and
// type conversion from these declarations.

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Fill in the placement form and get a prediction
    Form,

    /// Load the artifacts and print what they contain
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
