//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use tiffin::coupons::{Coupon, CouponValidation, CouponValidationRequest, CouponsPayload};

use crate::http::{ApiClient, ApiError};

/// Offer listing and coupon validation backed by `/coupons`.
#[derive(Debug, Clone)]
pub struct HttpCouponsService {
    client: ApiClient,
}

impl HttpCouponsService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CouponsService for HttpCouponsService {
    async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        let payload: CouponsPayload = self.client.get("/coupons/list").await?;

        Ok(payload.into_coupons())
    }

    async fn validate_coupon(
        &self,
        request: CouponValidationRequest,
    ) -> Result<CouponValidation, ApiError> {
        self.client.post("/coupons/validate", &request).await
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Retrieves the published offers.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError>;

    /// Checks a code against an order amount.
    async fn validate_coupon(
        &self,
        request: CouponValidationRequest,
    ) -> Result<CouponValidation, ApiError>;
}
