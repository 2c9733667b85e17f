use afce_core::geometry::Reconstruction;
use afce_core::{AssessmentResult, ChatMessage, MedicalImage, PatientState};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `afce schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::PatientState => schema_for!(PatientState),
        SchemaType::AssessmentResult => schema_for!(AssessmentResult),
        SchemaType::ChatMessage => schema_for!(ChatMessage),
        SchemaType::MedicalImage => schema_for!(MedicalImage),
        SchemaType::Reconstruction => schema_for!(Reconstruction),
    };
    output(&schema, flags.format)
}
