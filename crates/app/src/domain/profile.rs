//! Profile and phone verification service.

use async_trait::async_trait;
use mockall::automock;
use serde::de::IgnoredAny;
use tiffin::profile::{OtpRequest, PhoneUpdate, UserProfile};

use crate::{
    auth::PasswordChange,
    http::{ApiClient, ApiError},
};

/// Profile, phone and password endpoints under `/user`.
#[derive(Debug, Clone)]
pub struct HttpProfileService {
    client: ApiClient,
}

impl HttpProfileService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn post_ignoring_body(&self, path: &str, body: &OtpRequest) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.post(path, body).await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/user/profile").await
    }

    async fn update_phone(&self, update: PhoneUpdate) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.put("/user/update-phone", &update).await?;

        Ok(())
    }

    async fn update_password(&self, change: PasswordChange) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.put("/user/update-password", &change).await?;

        Ok(())
    }

    async fn send_otp(&self, phone: String) -> Result<(), ApiError> {
        self.post_ignoring_body("/user/send-otp", &OtpRequest { phone, otp: None })
            .await
    }

    async fn verify_otp(&self, phone: String, otp: String) -> Result<(), ApiError> {
        self.post_ignoring_body(
            "/user/verify-otp",
            &OtpRequest {
                phone,
                otp: Some(otp),
            },
        )
        .await
    }
}

#[automock]
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Retrieves the signed-in customer's profile.
    async fn profile(&self) -> Result<UserProfile, ApiError>;

    /// Saves a phone number.
    async fn update_phone(&self, update: PhoneUpdate) -> Result<(), ApiError>;

    /// Replaces the account password.
    async fn update_password(&self, change: PasswordChange) -> Result<(), ApiError>;

    /// Sends a one-time code to the phone.
    async fn send_otp(&self, phone: String) -> Result<(), ApiError>;

    /// Confirms the phone with a received code.
    async fn verify_otp(&self, phone: String, otp: String) -> Result<(), ApiError>;
}

/// Confirm a phone with its one-time code, then save it as verified.
///
/// The phone is only re-saved once the code is accepted.
///
/// # Errors
///
/// Returns the error of whichever call failed.
pub async fn verify_phone(
    profiles: &dyn ProfileService,
    phone: String,
    otp: String,
) -> Result<(), ApiError> {
    profiles.verify_otp(phone.clone(), otp).await?;

    profiles
        .update_phone(PhoneUpdate {
            phone,
            verified: Some(true),
        })
        .await
}
