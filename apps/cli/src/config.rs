use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The extraction credential is resolved here, before any client is built,
/// so a missing key fails at startup rather than mid-run.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
