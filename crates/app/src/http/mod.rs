//! HTTP client wrapper

mod client;
mod errors;
mod transport;

pub use client::{ApiClient, SessionSignal};
pub use errors::{ApiError, FALLBACK_MESSAGE, normalize_message};
pub use transport::{ApiRequest, ApiResponse, MockTransport, ReqwestTransport, Transport, TransportError};
