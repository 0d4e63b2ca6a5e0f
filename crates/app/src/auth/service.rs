//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use serde::de::IgnoredAny;
use serde_json::json;

use crate::{
    auth::{Credentials, LoginResponse, RegisterOutcome, RegisterResponse, SessionToken},
    http::{ApiClient, ApiError},
};

/// Login, registration and logout against `/auth`.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: ApiClient,
}

impl HttpAuthService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        let response: LoginResponse = self.client.post("/auth/login", credentials).await?;

        Ok(SessionToken::new(response.access_token))
    }

    async fn register(&self, credentials: &Credentials) -> Result<RegisterOutcome, ApiError> {
        let response: RegisterResponse = self.client.post("/auth/register", credentials).await?;

        Ok(response.into())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.post("/auth/logout", &json!({})).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError>;

    /// Create an account.
    async fn register(&self, credentials: &Credentials) -> Result<RegisterOutcome, ApiError>;

    /// Invalidate the current session on the backend.
    async fn logout(&self) -> Result<(), ApiError>;
}
