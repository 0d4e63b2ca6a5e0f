//! Payment service.

use async_trait::async_trait;
use mockall::automock;
use tiffin::orders::{OrderConfirmation, OrderSubmission};

use crate::http::{ApiClient, ApiError};

/// Checkout backed by `POST /payment/checkout`.
#[derive(Debug, Clone)]
pub struct HttpPaymentService {
    client: ApiClient,
}

impl HttpPaymentService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentService for HttpPaymentService {
    async fn checkout(&self, submission: OrderSubmission) -> Result<OrderConfirmation, ApiError> {
        self.client.post("/payment/checkout", &submission).await
    }
}

#[automock]
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Pays for and places an order.
    async fn checkout(&self, submission: OrderSubmission) -> Result<OrderConfirmation, ApiError>;
}
