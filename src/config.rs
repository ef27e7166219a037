use std::env;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";

/// Environment-driven settings for the binary. The backend base URL includes
/// the `/api` prefix.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub backend_url: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self {
            backend_url: env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
        }
    }
}
