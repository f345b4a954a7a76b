use anyhow::{bail, Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables (and `.env` when
/// present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin without the `/api` prefix, e.g. `http://localhost:8000`.
    pub api_url: String,
    pub timeout_secs: u64,
    pub email: Option<String>,
    pub password: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url =
            std::env::var("TRACKER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let config = Config {
            api_url: normalize_api_url(&api_url)?,
            timeout_secs: std::env::var("TRACKER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("TRACKER_TIMEOUT_SECS must be a whole number of seconds")?,
            email: optional_env("TRACKER_EMAIL"),
            password: optional_env("TRACKER_PASSWORD"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };
        Ok(config)
    }

    /// Configuration pointing at `api_url` with defaults for everything else.
    pub fn for_url(api_url: &str) -> Result<Self> {
        Ok(Config {
            api_url: normalize_api_url(api_url)?,
            timeout_secs: 30,
            email: None,
            password: None,
            rust_log: "info".to_string(),
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = normalize_api_url(api_url)?;
        Ok(self)
    }

    /// Credentials for an automatic login, when both halves are configured.
    pub fn credentials(&self) -> Option<crate::models::Credentials> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(crate::models::Credentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("API URL '{raw}' must start with http:// or https://");
    }
    Ok(trimmed.to_string())
}
