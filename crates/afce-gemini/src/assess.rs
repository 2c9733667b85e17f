//! Structured assessment through the assessment model.

use afce_core::services::AssessmentService;
use afce_core::{AssessmentResult, MedicalImage, PatientContext, RiskLevel};
use serde_json::{Value, json};

use crate::wire::{Content, GenerateContentRequest, GenerationConfig};
use crate::{GeminiClient, GeminiError};

/// Assessment prompt for `context`, with a grounding note when an image is attached.
///
/// # Errors
///
/// Returns [`GeminiError::Parse`] if the snapshot cannot be serialised.
pub fn assessment_prompt(
    context: &PatientContext,
    image: Option<&MedicalImage>,
) -> Result<String, GeminiError> {
    let domains = serde_json::to_string(&context.domains)?;
    let snapshot = serde_json::to_string(context)?;
    let image_note = image.map_or_else(String::new, |image| {
        format!(
            "VISUAL DATA ATTACHED: {}. Ground the assessment in both the systemic data \
             and this visual evidence (e.g. PET scan, cytometry chart).\n\n",
            image.label
        )
    });

    Ok(format!(
        "Act as the Abythral Medical Engine (AFCE-M).\n\
         Analyze the patient's systemic health state-space.\n\n\
         PATIENT DATA:\n\
         - Name: {name}\n\
         - Age: {age}\n\
         - Variability Index: {variability}\n\
         - Recovery Half-Life: {half_life}s\n\
         - Domain Data: {domains}\n\
         - Full Snapshot: {snapshot}\n\n\
         {image_note}\
         Provide a detailed assessment in JSON format:\n\
         1. summary: Global physiological geometry summary.\n\
         2. risks: Array of {{domain, finding, level}} for the 6 domains.\n\
         3. interventions: Array of strings.\n\
         4. visualGrounding: (If an image is provided) how the visual evidence \
         confirms or shifts the state-space prediction.",
        name = context.name,
        age = context.age,
        variability = context.variability_index,
        half_life = context.recovery_half_life,
    ))
}

/// `responseSchema` constraining the model to an [`AssessmentResult`].
#[must_use]
pub fn response_schema() -> Value {
    let levels: Vec<&str> = RiskLevel::ALL.iter().map(|level| level.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {"type": "STRING"},
            "risks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "domain": {"type": "STRING"},
                        "finding": {"type": "STRING"},
                        "level": {"type": "STRING", "enum": levels}
                    },
                    "required": ["domain", "finding", "level"]
                }
            },
            "interventions": {"type": "ARRAY", "items": {"type": "STRING"}},
            "visualGrounding": {"type": "STRING"}
        },
        "required": ["summary", "risks", "interventions"]
    })
}

/// Decode the model's JSON text into an [`AssessmentResult`].
///
/// # Errors
///
/// Returns [`GeminiError::Parse`] when the text is not a valid assessment.
pub fn parse_assessment(text: &str) -> Result<AssessmentResult, GeminiError> {
    serde_json::from_str(text.trim())
        .map_err(|e| GeminiError::Parse(format!("assessment response: {e}")))
}

impl AssessmentService for GeminiClient {
    type Error = GeminiError;

    async fn assess(
        &self,
        context: &PatientContext,
        image: Option<&MedicalImage>,
    ) -> Result<AssessmentResult, GeminiError> {
        let contents = [Content::user(assessment_prompt(context, image)?, image)];
        let request = GenerateContentRequest {
            contents: &contents,
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            }),
        };

        let text = self.generate(&self.assessment_model, &request).await?;
        let result = parse_assessment(&text)?;
        tracing::info!(
            patient = %context.id,
            risks = result.risks.len(),
            grounded = result.visual_grounding.is_some(),
            "gemini: assessment complete"
        );
        Ok(result)
    }
}
