//! Error types for the SSR gateway.
//!
//! The render path never surfaces an error to the requester; these types exist
//! so callers can pattern-match on what went wrong and recover locally.

use std::fmt;

/// Failure talking to the content API.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Non-2xx response, carrying the upstream message when one was provided.
    Api {
        message: String,
        status: u16,
        status_text: String,
    },
    /// No response at all (connection refused, DNS failure, timeout).
    Network(String),
    /// A 2xx response whose body could not be parsed as JSON.
    Decode(String),
}

impl ApiError {
    /// Human-readable message suitable for an error panel.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Api { message, .. } => message,
            ApiError::Network(msg) => msg,
            ApiError::Decode(msg) => msg,
        }
    }

    /// HTTP status code, when the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a transport-level failure from the HTTP client.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        tracing::warn!("content API request failed: {}", err);
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(
                "Network error: Unable to connect to the server. Please check your connection."
                    .to_string(),
            )
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Api {
                message, status, ..
            } => write!(f, "API error ({}): {}", status, message),
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Failure while constructing an HTML document. Answered with the static
/// fallback shell, never propagated to the requester.
#[derive(Debug)]
pub struct RenderError(pub String);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render error: {}", self.0)
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError(format!("failed to serialize initial data: {}", err))
    }
}
