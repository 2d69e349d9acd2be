//! Async Rust client for the B2BRouter e-invoicing API.
//!
//! Every call goes through one pipeline: build the request from the client
//! configuration, send it over the transport, then turn the response into a
//! JSON value, raw bytes, or a classified [`ApiError`].
//!
//! # Example
//!
//! ```ignore
//! use b2brouter::prelude::*;
//!
//! let client = B2BRouterClient::from_env()?;
//! let params = to_params(&serde_json::json!({ "invoice": { "number": "INV-1" } }))?;
//! let invoice = client.invoices().create("211162", &params).await?;
//!
//! match client.invoices().download_pdf(&invoice["id"], &Params::new()).await {
//!     Ok(pdf) => std::fs::write("invoice.pdf", pdf)?,
//!     Err(err) if err.is_not_found() => println!("PDF not available yet"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod b2brouter_client;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
pub mod services;

pub use b2brouter_client::B2BRouterClient;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use services::{Contacts, DocumentFormat, Invoices};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use b2brouter_core::{
    ApiError, ApiErrorKind, ApiResource, ClientConfig, ClientConfigBuilder, ContentType,
    DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_TIMEOUT, ENV_API_BASE, ENV_API_KEY,
    ENV_API_VERSION, ENV_TIMEOUT_SECS, Error, HEADER_API_KEY, HEADER_API_VERSION, HttpClient,
    Method, Params, Request, RequestBuilder, RequestOptions, Response, Result, UNKNOWN_ERROR,
    classify_binary, classify_json, extract_message, from_json, to_json, to_params,
    to_query_pairs, to_query_string,
};

// Re-export http types for status codes and headers
pub use b2brouter_core::{StatusCode, header};

pub use serde_json;
pub use url;
