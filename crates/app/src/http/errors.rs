//! API errors and message normalisation.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::http::TransportError;

/// Message used when nothing better is available.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Errors returned by [`ApiClient`](crate::http::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend rejected the request (4xx other than 401).
    #[error("{message}")]
    Validation {
        /// Response status.
        status: StatusCode,

        /// Normalised message.
        message: String,
    },

    /// The backend failed (5xx or any other unexpected status).
    #[error("{message}")]
    Server {
        /// Response status.
        status: StatusCode,

        /// Normalised message.
        message: String,
    },

    /// The session is no longer valid. The invalidation signal has already
    /// been published when this is returned.
    #[error("{message}")]
    Unauthorized {
        /// Normalised message.
        message: String,
    },

    /// A successful response carried a body that could not be decoded.
    #[error("unreadable response body")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be encoded.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Build the error for a non-success response.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = normalize_message(status, body);

        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized { message }
        } else if status.is_client_error() {
            Self::Validation { status, message }
        } else {
            Self::Server { status, message }
        }
    }

    /// Human-readable message shown inline to the customer.
    pub fn message(&self) -> String {
        let message = self.to_string();

        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Transport(_) | Self::Decode(_) | Self::Encode(_) => None,
        }
    }

    /// Whether the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the backend answered 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Extract the message to show for an error response.
///
/// A `detail` string wins; a `detail` array contributes each entry's `msg`
/// (or `message`) joined with `", "`; any other `detail` value is shown as
/// JSON. Without a usable `detail` the status line is used.
pub fn normalize_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(Value::take));

    let from_detail = match detail {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        Some(Value::Array(entries)) if !entries.is_empty() => Some(
            entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .get("msg")
                        .or_else(|| entry.get("message"))
                        .and_then(Value::as_str)
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Some(object @ Value::Object(_)) => Some(object.to_string()),
        _ => None,
    };

    from_detail.unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}
