use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::feedback::generator::generate_feedback;
use crate::models::interview::{InterviewRequest, InterviewResponse};
use crate::models::resume::ResumeData;
use crate::state::AppState;

/// POST /api/generate-answer
///
/// Coaching feedback for one answer. LLM trouble never fails the request;
/// it shows up as `fallback: true` instead.
pub async fn handle_generate_answer(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    if request.question.trim().is_empty() || request.user_answer.trim().is_empty() {
        return Err(AppError::Validation(
            "User answer and question are required".to_string(),
        ));
    }

    let resume = request.resume_context.as_ref().map(ResumeData::from_json);

    info!(
        "Generating feedback (type={}, resume_context={})",
        request.interview_type,
        resume.is_some()
    );

    let feedback = generate_feedback(
        &request.question,
        &request.user_answer,
        resume.as_ref(),
        &state.llm,
    )
    .await;

    Ok(Json(InterviewResponse {
        success: true,
        feedback: feedback.text,
        original_answer: request.user_answer,
        question: request.question,
        fallback: feedback.used_fallback,
    }))
}
