use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at
/// startup and passed by reference into each component. No component reads
/// the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Model handle for quiz question generation.
    pub question_model: String,
    /// Model handle for profile analysis.
    pub analysis_model: String,
    /// Model handle for career recommendation.
    pub career_model: String,
    /// Path to the reference careers PDF used by the document-grounded path.
    pub careers_doc_path: String,
    pub port: u16,
    pub rust_log: String,
}

/// Default model for all generation calls. Matches the deployed provider tier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            question_model: env_or("QUESTION_MODEL", DEFAULT_MODEL),
            analysis_model: env_or("ANALYSIS_MODEL", DEFAULT_MODEL),
            career_model: env_or("CAREER_MODEL", DEFAULT_MODEL),
            careers_doc_path: env_or("CAREERS_DOC_PATH", "Career-List.pdf"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5002".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
