//! Client facade bundling configuration, transport and endpoint services.

use std::sync::Arc;

use crate::{ApiResource, ClientConfig, HyperClient, Result, TransportConfig};
use crate::services::{Contacts, Invoices};

/// Entry point to the B2BRouter API.
///
/// Generic over the transport so tests can plug in any
/// [`HttpClient`](crate::HttpClient); production code uses [`HyperClient`].
///
/// # Example
///
/// ```ignore
/// use b2brouter::B2BRouterClient;
///
/// let client = B2BRouterClient::new("my-api-key")?;
/// let invoice = client.invoices().retrieve(42, &Default::default()).await?;
/// ```
#[derive(Debug)]
pub struct B2BRouterClient<C = HyperClient> {
    resource: ApiResource<C>,
}

impl<C: Clone> Clone for B2BRouterClient<C> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl B2BRouterClient<HyperClient> {
    /// Create a client with default settings for `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_config(ClientConfig::new(api_key)?))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or a value is invalid.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    /// Create a client with an explicit configuration.
    ///
    /// The transport's fallback timeout follows the configured timeout.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = HyperClient::with_config(
            TransportConfig::builder()
                .timeout(config.timeout())
                .build(),
        );
        Self::with_transport(config, transport)
    }
}

impl<C> B2BRouterClient<C> {
    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: C) -> Self {
        Self {
            resource: ApiResource::new(transport, config),
        }
    }

    /// Create a client sharing an existing configuration.
    #[must_use]
    pub const fn with_shared_config(config: Arc<ClientConfig>, transport: C) -> Self {
        Self {
            resource: ApiResource::with_shared_config(transport, config),
        }
    }

    /// The configuration used for every call.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.resource.config()
    }

    /// The request pipeline, for endpoints without a dedicated service.
    #[must_use]
    pub const fn resource(&self) -> &ApiResource<C> {
        &self.resource
    }

    /// Invoice endpoints.
    #[must_use]
    pub const fn invoices(&self) -> Invoices<'_, C> {
        Invoices::new(&self.resource)
    }

    /// Contact endpoints.
    #[must_use]
    pub const fn contacts(&self) -> Contacts<'_, C> {
        Contacts::new(&self.resource)
    }
}
