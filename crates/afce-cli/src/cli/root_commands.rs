use std::path::PathBuf;

use afce_core::perturbation::Challenge;
use clap::{Args, Subcommand, ValueEnum};

/// Top-level commands for the `afce` binary.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seeded patient state: systemic indices, stability, domains.
    State,
    /// Reconstruct the state-space geometry.
    Geometry(GeometryArgs),
    /// Flexibility/rigidity radar series per domain.
    Radar,
    /// Run a systemic challenge and print the resulting state.
    Perturb(PerturbArgs),
    /// Structured assessment of the patient through Gemini.
    Assess(AssessArgs),
    /// Ask the engine one question and print the transcript.
    Ask(AskArgs),
    /// Print the JSON schema for a data type.
    Schema(SchemaArgs),
    /// Interactive session over stdin against one in-memory dashboard.
    Session,
}

#[derive(Debug, Clone, Args)]
pub struct GeometryArgs {
    /// Override the variability index before reconstructing
    #[arg(long)]
    pub variability: Option<String>,

    /// Override the state-space volume before reconstructing
    #[arg(long)]
    pub volume: Option<String>,

    /// Include the 100 grid points in the output
    #[arg(long)]
    pub points: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PerturbArgs {
    /// Challenge: metabolic, immune, or neural (display names accepted)
    pub challenge: Challenge,

    /// Number of perturbations to apply back to back
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,
}

#[derive(Debug, Clone, Args)]
pub struct AssessArgs {
    /// Image (PET, MRI, cytometry chart) to ground the assessment in
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct AskArgs {
    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Image to attach to the question
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl AskArgs {
    #[must_use]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum SchemaType {
    PatientState,
    AssessmentResult,
    ChatMessage,
    MedicalImage,
    Reconstruction,
}
