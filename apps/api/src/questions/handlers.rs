use axum::{extract::Path, Json};

use crate::errors::AppError;
use crate::models::interview::QuestionResponse;
use crate::questions::{get_random_question, list_types, InterviewTypeSummary};

/// GET /api/question/:type
pub async fn handle_random_question(
    Path(interview_type): Path<String>,
) -> Result<Json<QuestionResponse>, AppError> {
    let (question, kind) = get_random_question(&interview_type)?;
    Ok(Json(QuestionResponse {
        question: question.to_string(),
        kind: kind.id().to_string(),
    }))
}

/// GET /api/interview-types
pub async fn handle_interview_types() -> Json<Vec<InterviewTypeSummary>> {
    Json(list_types())
}
