pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::feedback::handlers::handle_generate_answer;
use crate::questions::handlers::{handle_interview_types, handle_random_question};
use crate::resume::handlers::{
    handle_delete_resume, handle_list_resumes, handle_upload_resume, MAX_UPLOAD_BYTES,
};
use crate::state::AppState;

/// Request body cap for uploads: the file limit plus room for multipart framing,
/// so oversized files are reported by the upload handler rather than the transport.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        .route("/api/ollama-status", get(health::model_status_handler))
        // Question catalog
        .route("/api/question/:interview_type", get(handle_random_question))
        .route("/api/interview-types", get(handle_interview_types))
        // Coaching
        .route("/api/generate-answer", post(handle_generate_answer))
        // Resumes
        .route(
            "/api/upload-resume",
            post(handle_upload_resume).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/resumes", get(handle_list_resumes))
        .route("/api/resumes/:id", delete(handle_delete_resume))
        .with_state(state)
}
