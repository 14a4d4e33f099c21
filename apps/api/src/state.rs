use crate::llm_client::LlmClient;
use crate::resume::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Ollama-backed or unavailable; handlers do not care which.
    pub llm: LlmClient,
    pub resumes: ResumeStore,
}
