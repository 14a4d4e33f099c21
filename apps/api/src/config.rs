use anyhow::{Context, Result};

const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` talks to a local Ollama.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_host: String,
    pub ollama_model: String,
    /// `false` starts the server with the unavailable client (fallback-only mode).
    pub ollama_enabled: bool,
    pub ollama_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            ollama_host: env_or("OLLAMA_HOST", DEFAULT_OLLAMA_HOST)
                .trim_end_matches('/')
                .to_string(),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            ollama_enabled: parse_bool(&env_or("OLLAMA_ENABLED", "true"))
                .context("OLLAMA_ENABLED must be true or false")?,
            ollama_timeout_secs: env_or("OLLAMA_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("OLLAMA_TIMEOUT_SECS must be a whole number of seconds")?,
            cors_origins: split_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            ollama_enabled: true,
            ollama_timeout_secs: 120,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized boolean '{other}'"),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
