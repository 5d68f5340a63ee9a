use thiserror::Error;

/// Failure of a single GET against the dashboard API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request for {url} failed: Status {status}")]
    Status { url: String, status: u16 },

    #[error("Request for {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } | Self::Decode { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid server URL '{value}': {reason}")]
    InvalidServerUrl { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Unknown route '{0}'")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_url_and_code() {
        let error = FetchError::Status {
            url: "http://0.0.0.0:5000/farms/f1".to_string(),
            status: 500,
        };

        assert_eq!(
            error.to_string(),
            "Request for http://0.0.0.0:5000/farms/f1 failed: Status 500"
        );
        assert_eq!(error.url(), "http://0.0.0.0:5000/farms/f1");
    }
}
