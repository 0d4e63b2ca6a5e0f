//! API Config

use std::time::Duration;

use clap::Args;

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the storefront backend
    #[arg(
        long,
        env = "TIFFIN_API_BASE_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "TIFFIN_REQUEST_TIMEOUT_SECS",
        default_value_t = 15_u64,
        global = true
    )]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
