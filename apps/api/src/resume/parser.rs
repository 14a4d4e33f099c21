//! Resume Parser — asks the LLM to turn extracted résumé text into `ResumeData`.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::LlmClient;
use crate::models::resume::ResumeData;
use crate::resume::prompts::{resume_parse_system, RESUME_PARSE_PROMPT};

/// Never fails: an unavailable model, a prose reply or malformed JSON all
/// degrade to an empty `ResumeData`.
pub async fn parse_resume(text: &str, llm: &LlmClient) -> ResumeData {
    let prompt = RESUME_PARSE_PROMPT.replace("{resume_text}", text);

    match llm.call_json::<Value>(&prompt, &resume_parse_system()).await {
        Ok(value) => {
            let data = ResumeData::from_json(&value);
            info!(
                "Resume parsed: experience={}, education={}, skills={}",
                data.experience_count(),
                data.education_count(),
                data.skills.as_ref().map_or(0, Vec::len)
            );
            data
        }
        Err(e) => {
            warn!("Resume parsing unavailable, continuing without parsed fields: {e}");
            ResumeData::default()
        }
    }
}
