//! Address book service.

use async_trait::async_trait;
use mockall::automock;
use serde::de::IgnoredAny;
use tiffin::addresses::{Address, NewAddress, default_from_payload};

use crate::http::{ApiClient, ApiError};

/// Address book backed by `/addresses`.
#[derive(Debug, Clone)]
pub struct HttpAddressService {
    client: ApiClient,
}

impl HttpAddressService {
    /// Wrap a shared API client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AddressService for HttpAddressService {
    async fn list_addresses(&self) -> Result<Vec<Address>, ApiError> {
        self.client.get("/addresses/").await
    }

    async fn create_address(&self, address: NewAddress) -> Result<Address, ApiError> {
        self.client.post("/addresses/", &address).await
    }

    async fn update_address(&self, id: String, address: NewAddress) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .put(&format!("/addresses/{id}"), &address)
            .await?;

        Ok(())
    }

    async fn delete_address(&self, id: String) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.delete(&format!("/addresses/{id}")).await?;

        Ok(())
    }

    async fn default_address(&self) -> Result<Option<Address>, ApiError> {
        match self.client.get::<Option<Address>>("/addresses/default").await {
            Ok(payload) => Ok(default_from_payload(payload)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[automock]
#[async_trait]
pub trait AddressService: Send + Sync {
    /// Retrieves every saved address.
    async fn list_addresses(&self) -> Result<Vec<Address>, ApiError>;

    /// Saves a new address.
    async fn create_address(&self, address: NewAddress) -> Result<Address, ApiError>;

    /// Replaces the address with the given id.
    async fn update_address(&self, id: String, address: NewAddress) -> Result<(), ApiError>;

    /// Deletes the address with the given id.
    async fn delete_address(&self, id: String) -> Result<(), ApiError>;

    /// The address checkout delivers to, if one is set.
    async fn default_address(&self) -> Result<Option<Address>, ApiError>;
}
