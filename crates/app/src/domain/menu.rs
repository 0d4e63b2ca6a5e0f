//! Menu service.

use async_trait::async_trait;
use mockall::automock;
use tiffin::menu::{MenuItem, MenuPayload};
use tracing::debug;

use crate::http::{ApiClient, ApiError};

/// Menu backed by `GET /menu`.
#[derive(Debug, Clone)]
pub struct HttpMenuService {
    client: ApiClient,
}

impl HttpMenuService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuService for HttpMenuService {
    async fn list_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        let payload: MenuPayload = self.client.get("/menu/").await?;
        let items = payload.into_items();

        debug!(count = items.len(), "menu loaded");

        Ok(items)
    }
}

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Retrieves the full menu.
    async fn list_menu(&self) -> Result<Vec<MenuItem>, ApiError>;
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        http::MockTransport,
        test::{client, expect_call},
    };

    use super::*;

    #[tokio::test]
    async fn list_menu_accepts_wrapped_payload() -> TestResult {
        let mut transport = MockTransport::new();

        expect_call(
            &mut transport,
            Method::GET,
            "/menu/",
            StatusCode::OK,
            json!({"menu": [
                {"id": "1", "name": "Veg Thali", "price": 150, "category": "veg"},
                {"name": "Nameless", "price": 10, "category": "veg"}
            ]}),
        );

        let menu = HttpMenuService::new(client(transport)).list_menu().await?;

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.first().map(|item| item.name.as_str()), Some("Veg Thali"));

        Ok(())
    }

    #[tokio::test]
    async fn list_menu_surfaces_server_errors() {
        let mut transport = MockTransport::new();

        expect_call(
            &mut transport,
            Method::GET,
            "/menu/",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"detail": "database unavailable"}),
        );

        let result = HttpMenuService::new(client(transport)).list_menu().await;

        assert!(
            matches!(&result, Err(ApiError::Server { message, .. }) if message == "database unavailable"),
            "expected Server error, got {result:?}"
        );
    }
}
