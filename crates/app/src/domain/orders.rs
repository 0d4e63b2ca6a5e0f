//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use serde::de::IgnoredAny;
use tiffin::orders::{CancelRequest, Order, OrderId, OrdersPayload};

use crate::http::{ApiClient, ApiError};

/// Order history and cancellation backed by `/orders`.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let payload: OrdersPayload = self.client.get("/orders").await?;

        Ok(payload.into_orders())
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.client.get(&format!("/orders/{id}")).await
    }

    async fn cancel_order(&self, id: OrderId, reason: String) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .post(&format!("/orders/{id}/cancel"), &CancelRequest { reason })
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves the customer's orders.
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Retrieves a single order.
    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Asks the backend to cancel an order.
    async fn cancel_order(&self, id: OrderId, reason: String) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use testresult::TestResult;
    use tiffin::orders::OrderStatus;

    use crate::{
        http::MockTransport,
        test::{client, expect_call, expect_call_with_body},
    };

    use super::*;

    #[tokio::test]
    async fn list_orders_unwraps_the_orders_key() -> TestResult {
        let mut transport = MockTransport::new();

        expect_call(
            &mut transport,
            Method::GET,
            "/orders",
            StatusCode::OK,
            json!({"count": 2, "orders": [
                {"order_id": "ORD_1", "total_amount": 200, "status": "DELIVERED"},
                {"order_id": "ORD_2", "total_amount": 90}
            ]}),
        );

        let orders = HttpOrdersService::new(client(transport)).list_orders().await?;
        let statuses: Vec<OrderStatus> = orders.iter().map(|order| order.status).collect();

        assert_eq!(statuses, vec![OrderStatus::Delivered, OrderStatus::Placed]);

        Ok(())
    }

    #[tokio::test]
    async fn cancel_posts_reason() -> TestResult {
        let mut transport = MockTransport::new();

        expect_call_with_body(
            &mut transport,
            Method::POST,
            "/orders/ORD_1/cancel",
            json!({"reason": "Ordered by mistake"}),
            StatusCode::OK,
            json!({"message": "Order cancelled"}),
        );

        HttpOrdersService::new(client(transport))
            .cancel_order(OrderId::new("ORD_1"), "Ordered by mistake".to_string())
            .await?;

        Ok(())
    }
}
