// Interview coaching feedback: LLM-backed critique with a deterministic fallback.

pub mod generator;
pub mod handlers;
pub mod prompts;
