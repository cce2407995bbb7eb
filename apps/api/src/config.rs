use anyhow::{bail, Context, Result};

const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_temperature: f64,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let google_api_key = lookup("GOOGLE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'GOOGLE_API_KEY' is not set")?;

        let gemini_temperature = optional("GEMINI_TEMPERATURE", "0.3")
            .parse::<f64>()
            .context("GEMINI_TEMPERATURE must be a number")?;
        if !(0.0..=2.0).contains(&gemini_temperature) {
            bail!("GEMINI_TEMPERATURE must be between 0.0 and 2.0, got {gemini_temperature}");
        }

        Ok(Config {
            google_api_key,
            gemini_model: optional("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_temperature,
            gemini_base_url: optional("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            llm_timeout_secs: optional("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}
