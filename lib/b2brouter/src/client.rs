//! HTTP transport implementation using hyper-util.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{
    Error, Request, Response, Result,
    config::{TransportConfig, TransportConfigBuilder},
    connector::https_connector,
    middleware::LoggingLayer,
};

// ============================================================================
// Type-Erased Service for Middleware Composition
// ============================================================================

/// Type-erased service for middleware composition.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

/// Future type for Tower Service implementation.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

/// Thread-safe wrapper for `BoxedService`.
///
/// `BoxCloneService` is not `Sync`; the lock is only held long enough to
/// clone the service for one call.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request<Bytes>) -> ServiceFuture {
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

// ============================================================================
// Raw Client
// ============================================================================

/// Raw HTTP client using hyper-util.
#[derive(Clone)]
struct RawHyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl RawHyperClient {
    fn new(config: TransportConfig) -> Self {
        let connector = https_connector(config.connect_timeout);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Split a request into the hyper request and the timeout to apply.
    fn build_hyper_request(
        request: Request<Bytes>,
        fallback_timeout: Duration,
    ) -> Result<(http::Request<Full<Bytes>>, Duration)> {
        let (method, url, headers, body, timeout) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        let http_request = builder
            .body(body)
            .map_err(|e| Error::validation(e.to_string()))?;

        Ok((http_request, timeout.unwrap_or(fallback_timeout)))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let (hyper_request, timeout) = Self::build_hyper_request(request, self.config.timeout)?;

        // The whole exchange, body included, must fit in the timeout.
        tokio::time::timeout(timeout, async {
            let response = self
                .inner
                .request(hyper_request)
                .await
                .map_err(Self::map_hyper_error)?;

            let status = response.status().as_u16();
            let response_headers = Self::extract_headers(response.headers());

            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::connection(e.to_string()))?
                .to_bytes();

            Ok(Response::new(status, response_headers, body))
        })
        .await
        .map_err(|_| Error::Timeout)?
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = format!("{err:?}");

        if err.is_connect() {
            return Error::connection(msg);
        }

        let lower = msg.to_ascii_lowercase();
        if lower.contains("ssl") || lower.contains("tls") || lower.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<Request<Bytes>> for RawHyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send + 'static>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.execute(request).await })
    }
}

// ============================================================================
// Public Client
// ============================================================================

/// HTTP transport using hyper-util with connection pooling, TLS, and
/// middleware support.
///
/// Every response that reaches the client is returned as-is, whatever its
/// status; only failures to obtain a response are errors.
///
/// # Example
///
/// ```ignore
/// use b2brouter::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .connect_timeout(Duration::from_secs(5))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: SyncService,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a new client with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let raw = RawHyperClient::new(config.clone());
        Self::with_service(BoxCloneService::new(raw), config)
    }

    fn with_service(service: BoxedService, config: TransportConfig) -> Self {
        Self {
            service: SyncService::new(service),
            config,
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl b2brouter_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.service.call(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.service.call(request)
    }
}

/// Builder for [`HyperClient`].
///
/// # Example
///
/// ```ignore
/// use b2brouter::HyperClient;
/// use b2brouter::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Default)]
pub struct HyperClientBuilder {
    config: TransportConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Set the timeout used for requests that do not carry their own.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a Tower layer to the client.
    ///
    /// Layers are applied in order: first added = outermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Log every exchange at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log every exchange at debug level, headers included.
    ///
    /// The API key header is redacted.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client with all configured middleware.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();
        let mut service: BoxedService = BoxCloneService::new(RawHyperClient::new(config.clone()));

        // Wrap in reverse so the first layer added ends up outermost.
        for layer_fn in self.layers.iter().rev() {
            service = layer_fn(service);
        }

        HyperClient::with_service(service, config)
    }
}
