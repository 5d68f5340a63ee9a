//! Transport seam between the API client and whatever performs HTTP
//!
//! Native builds implement [`DataSource`] on top of an HTTP client, the
//! browser build implements [`LocalDataSource`] on top of `window.fetch`
//! (its futures are not `Send`).

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::FetchError;

/// Performs one GET and parses the body as JSON
#[trait_variant::make(DataSource: Send)]
pub trait LocalDataSource {
    /// Any status other than 200 must come back as [`FetchError::Status`]
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
enum StaticResponse {
    Json(Value),
    Status(u16),
}

/// In-memory source keyed by absolute URL. Unknown URLs answer 404.
/// Every request is recorded so callers can check what was fetched.
#[derive(Debug, Default)]
pub struct StaticSource {
    responses: HashMap<String, StaticResponse>,
    requests: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), StaticResponse::Json(body));
        self
    }

    #[must_use]
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), StaticResponse::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl DataSource for StaticSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(StaticResponse::Json(body)) => Ok(body.clone()),
            Some(StaticResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
