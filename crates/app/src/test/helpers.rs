//! Test Helpers

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tiffin::storage::{KeyValueStore, MemoryStore};

use crate::http::{ApiClient, ApiResponse, MockTransport};

/// Client over a mocked transport with empty in-memory storage.
pub(crate) fn client(transport: MockTransport) -> ApiClient {
    ApiClient::new(Arc::new(transport), Arc::new(MemoryStore::new()))
}

/// Client over a mocked transport and the given storage.
pub(crate) fn client_with_storage(
    transport: MockTransport,
    storage: Arc<dyn KeyValueStore>,
) -> ApiClient {
    ApiClient::new(Arc::new(transport), storage)
}

/// Expect exactly one `method path` request and answer it with `status` and `body`.
pub(crate) fn expect_call(
    transport: &mut MockTransport,
    method: Method,
    path: &'static str,
    status: StatusCode,
    body: Value,
) {
    transport
        .expect_send()
        .once()
        .withf(move |request| request.method == method && request.path == path)
        .return_once(move |_| Ok(ApiResponse::new(status, body.to_string())));
}

/// Expect one `method path` request carrying `expected` as its body.
pub(crate) fn expect_call_with_body(
    transport: &mut MockTransport,
    method: Method,
    path: &'static str,
    expected: Value,
    status: StatusCode,
    body: Value,
) {
    transport
        .expect_send()
        .once()
        .withf(move |request| {
            request.method == method
                && request.path == path
                && request.body.as_ref() == Some(&expected)
        })
        .return_once(move |_| Ok(ApiResponse::new(status, body.to_string())));
}
