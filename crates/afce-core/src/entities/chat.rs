use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::MedicalImage;
use crate::enums::Role;

/// One entry of the append-only chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MedicalImage>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<MedicalImage>) -> Self {
        self.image = image;
        self
    }
}
