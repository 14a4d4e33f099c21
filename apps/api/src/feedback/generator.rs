//! Feedback Generator — coaching feedback on a candidate's answer.
//!
//! Primary path: one chat exchange with the LLM.
//! Fallback path: a fixed coaching template, taken whenever the LLM is
//! unavailable or fails. The caller is told which path ran.

use tracing::{info, warn};

use crate::feedback::prompts::{
    feedback_prompt, COACH_SYSTEM, FALLBACK_FEEDBACK, FALLBACK_RESUME_TEMPLATE,
};
use crate::llm_client::LlmClient;
use crate::models::resume::ResumeData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    /// True when the text came from the fallback template.
    pub used_fallback: bool,
}

pub async fn generate_feedback(
    question: &str,
    answer: &str,
    resume_context: Option<&ResumeData>,
    llm: &LlmClient,
) -> Feedback {
    // An all-null context carries nothing to weave in.
    let resume_context = resume_context.filter(|data| !data.is_empty());
    let resume_summary = resume_context.map(render_resume_summary);
    let prompt = feedback_prompt(question, answer, resume_summary.as_deref());

    match llm.call(&prompt, COACH_SYSTEM).await {
        Ok(text) => {
            info!("Generated feedback with {} ({})", llm.model(), llm.backend_name());
            Feedback {
                text,
                used_fallback: false,
            }
        }
        Err(e) => {
            warn!("LLM feedback unavailable, using fallback response: {e}");
            Feedback {
                text: fallback_feedback(resume_context),
                used_fallback: true,
            }
        }
    }
}

/// Short plain-text rendering of a résumé for the coaching prompt.
pub fn render_resume_summary(data: &ResumeData) -> String {
    let or_unknown = |value: Option<&str>| value.unwrap_or("Not provided").to_string();

    [
        format!("Name: {}", or_unknown(data.name.as_deref())),
        format!("Summary: {}", or_unknown(data.summary.as_deref())),
        format!("Experience: {} positions", data.experience_count()),
        format!("Skills: {}", or_unknown(data.skills_joined().as_deref())),
        format!("Education: {} entries", data.education_count()),
    ]
    .join("\n")
}

/// Deterministic advice; prefixed with a résumé paragraph when context exists.
pub fn fallback_feedback(resume_context: Option<&ResumeData>) -> String {
    let Some(data) = resume_context else {
        return FALLBACK_FEEDBACK.to_string();
    };

    let count = data.experience_count();
    let position_word = if count == 1 { "position" } else { "positions" };
    let skills = data
        .skills_joined()
        .unwrap_or_else(|| "several areas".to_string());

    // Skills come from parsed résumé text, so they are substituted last.
    let preamble = FALLBACK_RESUME_TEMPLATE
        .replace("{experience_count}", &count.to_string())
        .replace("{position_word}", position_word)
        .replace("{skills}", &skills);

    format!("{preamble}{FALLBACK_FEEDBACK}")
}
