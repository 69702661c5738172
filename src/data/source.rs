//! JSON-over-HTTP transport.
//!
//! A single blocking GET per call, no retries: the caller decides what to do
//! with a failure.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AppError;

/// Something that answers a GET with a parsed JSON body.
pub trait JsonSource: Sync {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, AppError>;
}

pub struct HttpSource {
    client: Client,
    service: &'static str,
    auth_header: Option<(&'static str, String)>,
}

impl HttpSource {
    pub fn new(service: &'static str) -> Self {
        Self {
            client: Client::new(),
            service,
            auth_header: None,
        }
    }

    pub fn with_auth_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.auth_header = Some((name, value.into()));
        self
    }
}

impl JsonSource for HttpSource {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, AppError> {
        debug!(service = self.service, url, ?query, "GET");

        let mut req = self
            .client
            .get(url)
            .query(query)
            .header("accept", "application/json");
        if let Some((name, value)) = &self.auth_header {
            req = req.header(*name, value);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::new(4, format!("{} request failed: {e}", self.service)))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(service = self.service, url, %status, "non-success response");
            return Err(AppError::new(
                4,
                format!("{} request failed with status {status}.", self.service),
            ));
        }

        resp.json()
            .map_err(|e| AppError::new(4, format!("Failed to parse {} response: {e}", self.service)))
    }
}

/// Join a base URL and a relative endpoint path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
