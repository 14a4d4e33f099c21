use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::llm_client::LlmError;
use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Interview Coach API is running",
        "status": "healthy"
    }))
}

/// GET /api/health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Interview Coach API is running"
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub status: &'static str,
    pub ollama_running: bool,
    /// Whether the configured model is installed (named after the default model).
    pub llama3_available: bool,
    pub available_models: Vec<String>,
    pub message: String,
}

/// GET /api/ollama-status
///
/// Reports whether the model server answers and whether the configured
/// model is in its catalog. Always 200; problems are described in the body.
pub async fn model_status_handler(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let model = state.llm.model();

    let response = match state.llm.list_models().await {
        Ok(models) => {
            let available = models.iter().any(|name| name.contains(model));
            ModelStatusResponse {
                status: if available { "success" } else { "warning" },
                ollama_running: true,
                llama3_available: available,
                available_models: models,
                message: if available {
                    format!("{model} model is available")
                } else {
                    format!("{model} model not found. Please install it with: ollama pull {model}")
                },
            }
        }
        Err(e) => ModelStatusResponse {
            status: "error",
            ollama_running: false,
            llama3_available: false,
            available_models: Vec::new(),
            message: match e {
                LlmError::Unavailable => "Ollama client not initialized".to_string(),
                other => format!("Ollama connection failed: {other}"),
            },
        },
    };

    Json(response)
}
