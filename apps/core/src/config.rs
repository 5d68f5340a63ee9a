use std::fmt;

use url::Url;

use crate::api::ImageSize;
use crate::error::ConfigError;

/// Server used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://0.0.0.0:5000";

/// Environment variable holding the server root
pub const SERVER_URL_VAR: &str = "ROMI_SERVER_URL";

/// Base URL of the dashboard API, stored without a trailing slash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRoot(String);

impl ServerRoot {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim().trim_end_matches('/');
        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            value: value.to_string(),
            reason,
        };

        let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Reads the `server` parameter of a query string such as `?server=http://host:5000`
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let query = query.trim_start_matches('?');
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "server")
            .map_or_else(|| Ok(Self::default()), |(_, value)| Self::parse(&value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn image_url(&self, farm: &str, zone: &str, image: &str, size: ImageSize) -> String {
        format!("{}/images/{farm}/{zone}/{image}?size={size}", self.0)
    }
}

impl Default for ServerRoot {
    fn default() -> Self {
        Self(DEFAULT_SERVER_URL.to_string())
    }
}

impl fmt::Display for ServerRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
