//! The resource request pipeline.
//!
//! [`ApiResource`] turns a logical call (method, resource path, parameters)
//! into a [`Request`], sends it through an [`HttpClient`] and classifies the
//! answer. Endpoint services hold one and only ever call
//! [`ApiResource::request`] or [`ApiResource::request_binary`].
//!
//! Every call walks `built -> dispatched -> succeeded | failed` exactly once.
//! Nothing is retried and no state outlives the call.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use crate::{
    ClientConfig, ContentType, HttpClient, Method, Params, Request, Result, classify,
    to_query_pairs,
};

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "X-B2B-API-Key";

/// Header carrying the API version.
pub const HEADER_API_VERSION: &str = "X-B2B-API-Version";

/// Per-call options.
///
/// Accepted by every call and currently ignored; new settings will be added
/// here without changing call signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct RequestOptions {}

/// Stateless request pipeline shared by endpoint services.
///
/// Holds the transport and a read-only [`ClientConfig`]; cloning is cheap when
/// the transport is cheap to clone.
#[derive(Debug)]
pub struct ApiResource<C> {
    client: C,
    config: Arc<ClientConfig>,
}

impl<C: Clone> Clone for ApiResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<C> ApiResource<C> {
    /// Create a pipeline over `client` with its own configuration.
    #[must_use]
    pub fn new(client: C, config: ClientConfig) -> Self {
        Self::with_shared_config(client, Arc::new(config))
    }

    /// Create a pipeline sharing an existing configuration.
    #[must_use]
    pub const fn with_shared_config(client: C, config: Arc<ClientConfig>) -> Self {
        Self { client, config }
    }

    /// The configuration used for every call.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Build the request for a JSON-mode call without sending it.
    ///
    /// GET and DELETE put non-empty `params` in the query string; every other
    /// method sends them as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the parameters do not
    /// serialize. Nothing is sent in that case.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        _options: &RequestOptions,
    ) -> Result<Request<Bytes>> {
        let builder = self
            .base_request(method, path)?
            .header("Content-Type", ContentType::Json.as_str())
            .header("Accept", ContentType::Json.as_str());

        let request = if method.uses_query_params() {
            builder.query_pairs(to_query_pairs(params)).build()
        } else {
            builder.json(params)?.build()
        };
        Ok(request)
    }

    /// Build the request for a binary-mode call without sending it.
    ///
    /// `accept` names the wanted document format (e.g. `pdf.invoice`).
    /// Parameters always go to the query string and no body is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn build_binary_request(
        &self,
        method: Method,
        path: &str,
        accept: &str,
        params: &Params,
        _options: &RequestOptions,
    ) -> Result<Request<Bytes>> {
        Ok(self
            .base_request(method, path)?
            .header("Accept", accept)
            .query_pairs(to_query_pairs(params))
            .build())
    }

    fn base_request(&self, method: Method, path: &str) -> Result<crate::RequestBuilder<Bytes>> {
        let url = self.config.url_for(path)?;
        Ok(Request::builder(method, url)
            .header(HEADER_API_KEY, self.config.api_key())
            .header(HEADER_API_VERSION, self.config.api_version())
            .timeout(self.config.timeout()))
    }
}

impl<C: HttpClient> ApiResource<C> {
    /// Perform a JSON-mode call and return the decoded payload.
    ///
    /// An empty or non-JSON success body yields an empty JSON object.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Api`] when the API answers with a status of 400 or above;
    /// - a transport error when no response is received;
    /// - a local error when the request cannot be built.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let request = self.build_request(method, path, params, options)?;
        debug!(%method, path, "dispatching JSON request");
        let response = self.client.execute(request).await?;
        classify::classify_json(response)
    }

    /// Perform a binary-mode call and return the raw body.
    ///
    /// Failures are classified exactly like [`ApiResource::request`].
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Api`] when the API answers with a status of 400 or above;
    /// - a transport error when no response is received;
    /// - a local error when the request cannot be built.
    pub async fn request_binary(
        &self,
        method: Method,
        path: &str,
        accept: &str,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Bytes> {
        let request = self.build_binary_request(method, path, accept, params, options)?;
        debug!(%method, path, accept, "dispatching binary request");
        let response = self.client.execute(request).await?;
        classify::classify_binary(response)
    }
}
