use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    /// Base URL of a remote interview API. When set, the interview detail
    /// page loads interviews over HTTP instead of from the database.
    pub vapi_base_url: Option<String>,
    pub app_env: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            session_secret: require_env("SESSION_SECRET")?,
            vapi_base_url: std::env::var("VAPI_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Session cookies carry the `Secure` flag only in production.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/prepview_test".to_string(),
            session_secret: "test-session-secret".to_string(),
            vapi_base_url: None,
            app_env: "development".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
