//! Storefront configuration

use clap::Args;

use crate::config::{api::ApiConfig, observability::LoggingConfig, storage::StorageConfig};

pub mod api;
pub mod observability;
pub mod storage;

pub use observability::LogFormat;

/// Settings shared by every storefront command.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local state settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load `.env` into the process environment if present.
    pub fn load_env() {
        _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: StorefrontConfig,
    }

    #[test]
    fn explicit_flags_override_defaults() -> TestResult {
        let cli = TestCli::try_parse_from([
            "tiffin",
            "--api-base-url",
            "https://tiffin.example",
            "--request-timeout-secs",
            "5",
            "--keep-cart-on-logout",
            "--log-format",
            "json",
        ])?;

        assert_eq!(cli.config.api.api_base_url, "https://tiffin.example");
        assert_eq!(cli.config.api.timeout(), Duration::from_secs(5));
        assert!(cli.config.storage.keep_cart_on_logout);
        assert_eq!(cli.config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn state_dir_is_created_on_open() -> TestResult {
        let dir = tempfile::tempdir()?;
        let state_dir = dir.path().join("state");

        let cli = TestCli::try_parse_from([
            "tiffin",
            "--state-dir",
            state_dir.to_str().unwrap_or_default(),
        ])?;

        let store = cli.config.storage.open()?;

        assert!(store.root().is_dir());

        Ok(())
    }
}
