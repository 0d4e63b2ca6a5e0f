//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use serde::de::IgnoredAny;
use tiffin::profile::NewReview;

use crate::http::{ApiClient, ApiError};

/// Review submission backed by `POST /reviews`.
#[derive(Debug, Clone)]
pub struct HttpReviewsService {
    client: ApiClient,
}

impl HttpReviewsService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewsService for HttpReviewsService {
    async fn submit_review(&self, review: NewReview) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.post("/reviews", &review).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Publishes a review.
    async fn submit_review(&self, review: NewReview) -> Result<(), ApiError>;
}
