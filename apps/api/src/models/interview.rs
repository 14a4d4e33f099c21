use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/generate-answer`.
///
/// Missing string fields default to empty so the handler can answer with a
/// 400 validation error rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub interview_type: String,
    /// Kept loose so a mistyped field degrades to null instead of
    /// rejecting the whole body.
    #[serde(default)]
    pub resume_context: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewResponse {
    pub success: bool,
    pub feedback: String,
    pub original_answer: String,
    pub question: String,
    /// True when the language model was unavailable or failed.
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
}
