//! Wire transport.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use thiserror::Error;

use crate::auth::SessionToken;

/// A request as handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,

    /// Path relative to the API base URL, starting with `/`.
    pub path: String,

    /// Bearer token attached as `Authorization: Bearer <token>`.
    pub bearer: Option<SessionToken>,

    /// JSON body.
    pub body: Option<Value>,
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,

    /// Undecoded body.
    pub body: String,
}

impl ApiResponse {
    /// Build a response from a status code and body.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failures below the HTTP layer: no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded the configured timeout.
    #[error("timeout of {0:?} exceeded")]
    Timeout(Duration),

    /// The backend could not be reached.
    #[error("{0}")]
    Network(String),

    /// The configured base URL and path do not form a valid URL.
    #[error("invalid request url {0}")]
    InvalidUrl(String),
}

/// Sends requests to the backend.
#[automock]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response, whatever its status.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        reqwest::Url::parse(&url).map_err(|error| TransportError::InvalidUrl(format!("{url}: {error}")))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .http
            .request(request.method, url)
            .timeout(self.timeout)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| self.classify(&error))?;
        let status = response.status();
        let body = response.text().await.map_err(|error| self.classify(&error))?;

        Ok(ApiResponse { status, body })
    }
}

impl ReqwestTransport {
    fn classify(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn urls_join_without_double_slashes() -> TestResult {
        let transport = ReqwestTransport::new("http://localhost:8000/", Duration::from_secs(1));

        assert_eq!(transport.base_url(), "http://localhost:8000");
        assert_eq!(
            transport.url_for("/menu/")?.as_str(),
            "http://localhost:8000/menu/"
        );

        Ok(())
    }

    #[test]
    fn garbage_base_url_is_reported() {
        let transport = ReqwestTransport::new("not a url", Duration::from_secs(1));

        assert!(
            matches!(transport.url_for("/menu"), Err(TransportError::InvalidUrl(_))),
            "expected InvalidUrl"
        );
    }
}
