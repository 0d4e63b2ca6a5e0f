//! Authenticated JSON client.

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
    time::Instant,
};

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tiffin::storage::{KeyValueStore, TOKEN_KEY};
use tokio::sync::broadcast;
use tracing::{Instrument, debug, info_span, warn};

use crate::{
    auth::SessionToken,
    http::{ApiError, ApiRequest, Transport},
};

const SIGNAL_CAPACITY: usize = 16;

/// Session-wide notifications published by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// The backend answered 401; the stored session must be torn down.
    Invalidated,
}

/// JSON client for the storefront backend.
///
/// The bearer token is read from storage on every request so a login or
/// logout takes effect immediately. Any 401 publishes
/// [`SessionSignal::Invalidated`] to every subscriber before the call fails.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn KeyValueStore>,
    signals: broadcast::Sender<SessionSignal>,
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("storage", &self.storage)
            .field("subscribers", &self.signals.receiver_count())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client sending through `transport` and reading the token
    /// from `storage`.
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn KeyValueStore>) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);

        Self {
            transport,
            storage,
            signals,
        }
    }

    /// Subscribe to session signals.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionSignal> {
        self.signals.subscribe()
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-success status or
    /// an undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-success status or
    /// an undecodable body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;

        self.send(Method::POST, path, Some(body)).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-success status or
    /// an undecodable body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;

        self.send(Method::PUT, path, Some(body)).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-success status or
    /// an undecodable body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let span = info_span!("api_request", %method, path);

        async move {
            let started = Instant::now();

            let request = ApiRequest {
                method,
                path: path.to_string(),
                bearer: self.bearer(),
                body,
            };

            let response = self.transport.send(request).await.inspect_err(|error| {
                debug!(%error, elapsed_ms = started.elapsed().as_millis(), "request failed");
            })?;

            debug!(
                status = response.status.as_u16(),
                elapsed_ms = started.elapsed().as_millis(),
                "response received"
            );

            if !response.status.is_success() {
                let error = ApiError::from_response(response.status, &response.body);

                if error.is_unauthorized() {
                    // No subscribers is fine: nothing holds a session.
                    _ = self.signals.send(SessionSignal::Invalidated);
                }

                return Err(error);
            }

            let body = if response.body.trim().is_empty() {
                "null"
            } else {
                response.body.as_str()
            };

            serde_json::from_str(body).map_err(ApiError::Decode)
        }
        .instrument(span)
        .await
    }

    fn bearer(&self) -> Option<SessionToken> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SessionToken::new),
            Err(error) => {
                warn!(%error, "failed to read session token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde::de::IgnoredAny;
    use serde_json::json;
    use testresult::TestResult;
    use tiffin::storage::MemoryStore;
    use tokio::sync::broadcast::error::TryRecvError;

    use crate::{
        http::{ApiResponse, MockTransport, TransportError},
        test::client_with_storage as client,
    };

    use super::*;

    #[tokio::test]
    async fn attaches_stored_token_as_bearer() -> TestResult {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        storage.set(TOKEN_KEY, "tok-123")?;

        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.method == Method::GET
                    && request.path == "/user/profile"
                    && request.bearer.as_ref().map(SessionToken::expose) == Some("tok-123")
            })
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, r#"{"email":"a@b.c"}"#)));

        let profile: Value = client(transport, storage).get("/user/profile").await?;

        assert_eq!(profile, json!({"email": "a@b.c"}));

        Ok(())
    }

    #[tokio::test]
    async fn omits_bearer_without_token() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| request.bearer.is_none())
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, "[]")));

        let menu: Vec<Value> = client(transport, Arc::new(MemoryStore::new()))
            .get("/menu/")
            .await?;

        assert!(menu.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn sends_json_body() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.method == Method::POST
                    && request.body == Some(json!({"reason": "late"}))
            })
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, "")));

        let _: IgnoredAny = client(transport, Arc::new(MemoryStore::new()))
            .post("/orders/A/cancel", &json!({"reason": "late"}))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_publishes_invalidation() -> TestResult {
        let mut transport = MockTransport::new();

        transport.expect_send().once().return_once(|_| {
            Ok(ApiResponse::new(
                StatusCode::UNAUTHORIZED,
                r#"{"detail":"Invalid or expired token"}"#,
            ))
        });

        let client = client(transport, Arc::new(MemoryStore::new()));
        let mut signals = client.subscribe();

        let result = client.get::<Value>("/orders").await;

        assert!(
            matches!(&result, Err(ApiError::Unauthorized { message }) if message == "Invalid or expired token"),
            "expected Unauthorized, got {result:?}"
        );
        assert_eq!(signals.try_recv()?, SessionSignal::Invalidated);
        assert_eq!(signals.try_recv(), Err(TryRecvError::Empty));

        Ok(())
    }

    #[tokio::test]
    async fn other_failures_do_not_signal() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .return_once(|_| Ok(ApiResponse::new(StatusCode::BAD_REQUEST, r#"{"detail":"nope"}"#)));

        let client = client(transport, Arc::new(MemoryStore::new()));
        let mut signals = client.subscribe();

        let result = client.get::<Value>("/orders").await;

        assert_eq!(result.map_err(|error| error.message()), Err("nope".to_string()));
        assert_eq!(signals.try_recv(), Err(TryRecvError::Empty));

        Ok(())
    }

    #[tokio::test]
    async fn transport_errors_surface_their_message() {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .return_once(|_| Err(TransportError::Network("connection refused".to_string())));

        let result = client(transport, Arc::new(MemoryStore::new()))
            .get::<Value>("/menu/")
            .await;

        assert_eq!(
            result.map_err(|error| error.message()),
            Err("connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_decode_error() {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .return_once(|_| Ok(ApiResponse::new(StatusCode::OK, "<html>")));

        let result = client(transport, Arc::new(MemoryStore::new()))
            .get::<Vec<Value>>("/menu/")
            .await;

        assert!(
            matches!(result, Err(ApiError::Decode(_))),
            "expected Decode, got {result:?}"
        );
    }
}
