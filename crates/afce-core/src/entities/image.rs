use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An attached scan or chart, carried as an opaque base64 payload.
///
/// The core never decodes `data`; it is forwarded verbatim as inline data to
/// the external service.
#[derive(Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalImage {
    /// Base64 (standard alphabet) encoded bytes.
    pub data: String,
    pub mime_type: String,
    /// Original file name.
    pub label: String,
}

// Payloads run to megabytes; keep them out of logs.
impl fmt::Debug for MedicalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MedicalImage")
            .field("data", &format_args!("<{} base64 chars>", self.data.len()))
            .field("mime_type", &self.mime_type)
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_omits_payload() {
        let image = MedicalImage {
            data: "aGVsbG8gd29ybGQ=".to_string(),
            mime_type: "image/png".to_string(),
            label: "pet.png".to_string(),
        };
        let rendered = format!("{image:?}");
        assert!(rendered.contains("<16 base64 chars>"));
        assert!(!rendered.contains("aGVsbG8"));
        assert!(rendered.contains("pet.png"));
    }
}
