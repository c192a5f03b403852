use thiserror::Error;

/// Errors surfaced by [`BackOfficeClient`](crate::BackOfficeClient).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("network error calling {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("{summary}")]
    Status { status: u16, summary: String },

    #[error("unexpected response from {url}: {source}")]
    Decode { url: String, source: serde_json::Error },
}

impl ApiError {
    /// HTTP status code when the server answered with a failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
