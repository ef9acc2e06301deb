use serde::{Deserialize, Serialize};

/// One choice in an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePayload {
    pub text: String,
    pub is_correct: bool,
}

/// Body of `POST /api/question/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuestionRequest {
    pub enhanced_text: String,
    pub category: String,
    pub explanation: String,
    pub requires_image: bool,
    pub choices: Vec<ChoicePayload>,
}

/// Body of `POST /api/generate_explanation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    pub question_text: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
}

/// JSON body of `POST /api/question/:id/image` when linking an existing page image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignImageRequest {
    pub image_url: String,
}

/// Generic acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ApiAck {
    /// Server-reported failure message, if the body signals one.
    pub fn failure(&self) -> Option<String> {
        if let Some(error) = self.error.as_deref().filter(|e| !e.trim().is_empty()) {
            return Some(error.to_string());
        }
        if self.status.as_deref() == Some("error") {
            return Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            );
        }
        None
    }
}
