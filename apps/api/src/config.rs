use anyhow::{Context, Result};

pub const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

/// Server configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_audience: optional_env("JWT_AUDIENCE", DEFAULT_JWT_AUDIENCE),
            ai_gateway_url: optional_env("AI_GATEWAY_URL", DEFAULT_AI_GATEWAY_URL),
            ai_gateway_api_key: require_env("AI_GATEWAY_API_KEY")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
