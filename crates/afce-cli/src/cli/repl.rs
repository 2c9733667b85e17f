//! Line grammar for `afce session`.
//!
//! Each input line is split on whitespace and parsed as a multicall command,
//! so the first word is the verb.

use std::path::PathBuf;

use afce_core::enums::{ConstraintDomain, DeviceField, SystemIndex};
use afce_core::perturbation::Challenge;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(multicall = true, disable_help_flag = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Debug, Subcommand)]
#[command(disable_help_subcommand = true)]
pub enum ReplCommand {
    /// Show the state readout and domains
    State,
    /// Show the geometry summary
    Geometry,
    /// Show the radar series
    Radar,
    /// Trigger a perturbation and wait for it to land
    Perturb { challenge: Challenge },
    /// Set one domain field from a device reading
    Edit {
        domain: ConstraintDomain,
        field: DeviceField,
        value: String,
    },
    /// Set a systemic index
    Index { index: SystemIndex, value: String },
    /// Select the image for the next assessment (no path clears it)
    Image { path: Option<PathBuf> },
    /// Run an assessment
    Assess,
    /// Ask the engine a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Print the chat transcript
    History,
    /// Clear the assessment and the selected image
    Reset,
    /// List commands
    Help,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

impl ReplLine {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the clap error (usage text included) for unknown verbs or
    /// malformed arguments.
    pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        Self::try_parse_from(words).map(|parsed| Some(parsed.command))
    }
}
