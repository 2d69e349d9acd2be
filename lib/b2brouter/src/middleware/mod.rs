//! Tower middleware layers for the B2BRouter HTTP transport.
//!
//! Layers are added through [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer);
//! the first layer added is the first to see each request.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`, with the API
//!   key redacted
//!
//! Any other Tower layer over [`BoxedService`](crate::BoxedService) works too:
//!
//! ```ignore
//! use b2brouter::HyperClient;
//! use b2brouter::middleware::ConcurrencyLimitLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(ConcurrencyLimitLayer::new(4))
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer, REDACTED, redact_headers};

pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::{Layer, ServiceBuilder};
