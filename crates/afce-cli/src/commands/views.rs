//! Output shapes shared by the one-shot commands and the session loop.

use afce_core::geometry::{Point, Reconstruction};
use afce_core::readout::StateReadout;
use afce_core::{AssessmentResult, ChatMessage, PatientState, RiskFinding, RiskLevel, Role};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRow {
    pub domain: String,
    pub feed: &'static str,
    pub flexibility: f64,
    pub rigidity: f64,
    pub collapse_risk: f64,
    pub current_value: f64,
    pub device_source: Option<String>,
}

#[must_use]
pub fn domain_rows(state: &PatientState) -> Vec<DomainRow> {
    state
        .domains
        .iter()
        .map(|metric| DomainRow {
            domain: metric.domain.to_string(),
            feed: metric.domain.device_feed(),
            flexibility: round1(metric.flexibility),
            rigidity: round1(metric.rigidity),
            collapse_risk: round1(metric.collapse_risk),
            current_value: metric.current_value,
            device_source: metric.device_source.clone(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    #[serde(flatten)]
    pub readout: StateReadout,
    pub domains: Vec<DomainRow>,
}

/// Tables get the readout and the domain table separately; JSON gets one document.
pub fn print_state(state: &PatientState, flags: &GlobalFlags) -> anyhow::Result<()> {
    let readout = StateReadout::from_state(state);
    if flags.format == OutputFormat::Table {
        output(&readout, flags.format)?;
        println!();
        return output(&domain_rows(state), flags.format);
    }
    output(
        &StateView {
            readout,
            domains: domain_rows(state),
        },
        flags.format,
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryView {
    pub entropy: f64,
    pub tension: f64,
    pub collapsing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl GeometryView {
    #[must_use]
    pub fn new(grid: Reconstruction, with_points: bool) -> Self {
        Self {
            entropy: grid.entropy,
            tension: grid.tension,
            collapsing: grid.is_collapsing(),
            points: with_points.then_some(grid.points),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentHeadline {
    pub summary: String,
    pub highest_level: Option<RiskLevel>,
    pub interventions: String,
    pub visual_grounding: Option<String>,
}

pub fn print_assessment(result: &AssessmentResult, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.format != OutputFormat::Table {
        return output(result, flags.format);
    }
    output(
        &AssessmentHeadline {
            summary: result.summary.clone(),
            highest_level: result.highest_level(),
            interventions: result.interventions.join("; "),
            visual_grounding: result.visual_grounding.clone(),
        },
        flags.format,
    )?;
    println!();
    output::<Vec<RiskFinding>>(&result.risks, flags.format)
}

#[derive(Debug, Serialize)]
pub struct TranscriptRow {
    pub role: Role,
    pub text: String,
    pub image: Option<String>,
}

#[must_use]
pub fn transcript(history: &[ChatMessage]) -> Vec<TranscriptRow> {
    history
        .iter()
        .map(|message| TranscriptRow {
            role: message.role,
            text: message.text.clone(),
            image: message.image.as_ref().map(|image| image.label.clone()),
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
