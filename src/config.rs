//! Upstream endpoints and credentials, read from the environment (`.env`).

use tracing::debug;

use crate::error::AppError;

pub const DEFAULT_CENTIC_BASE_URL: &str = "https://api-staging.centic.io/dev/v3";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone)]
pub struct Config {
    pub centic_base_url: String,
    pub centic_api_key: Option<String>,
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            centic_base_url: DEFAULT_CENTIC_BASE_URL.to_string(),
            centic_api_key: None,
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            coingecko_api_key: None,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read:
    ///
    /// - `CENTIC_BASE_URL`, `CENTIC_API_KEY`
    /// - `COINGECKO_BASE_URL`, `COINGECKO_API_KEY`
    ///
    /// Keys are optional here; a missing Centic key is only an error once a
    /// Centic command needs it.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| var(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            centic_base_url: non_empty("CENTIC_BASE_URL").unwrap_or(defaults.centic_base_url),
            centic_api_key: non_empty("CENTIC_API_KEY"),
            coingecko_base_url: non_empty("COINGECKO_BASE_URL").unwrap_or(defaults.coingecko_base_url),
            coingecko_api_key: non_empty("COINGECKO_API_KEY"),
        }
    }

    pub fn require_centic_key(&self) -> Result<&str, AppError> {
        self.centic_api_key
            .as_deref()
            .ok_or_else(|| AppError::new(2, "Missing CENTIC_API_KEY in environment (.env)."))
    }
}
