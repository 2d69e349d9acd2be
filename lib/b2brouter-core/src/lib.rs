//! Core types and request pipeline for the B2BRouter API client.
//!
//! This crate provides the transport-agnostic building blocks:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - request descriptors
//! - [`Response`] - raw HTTP response
//! - [`ClientConfig`] - immutable API key / version / base URL / timeout
//! - [`HttpClient`] - transport trait
//! - [`ApiResource`] - the request/response pipeline used by endpoint services
//! - [`Error`], [`ApiError`] and [`ApiErrorKind`] - error taxonomy
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
pub mod classify;
mod client;
mod config;
mod error;
mod method;
pub mod prelude;
mod request;
mod resource;
mod response;

pub use body::{ContentType, Params, from_json, to_json, to_params, to_query_pairs, to_query_string};
pub use classify::{UNKNOWN_ERROR, classify_binary, classify_json, extract_message};
pub use client::HttpClient;
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_TIMEOUT,
    ENV_API_BASE, ENV_API_KEY, ENV_API_VERSION, ENV_TIMEOUT_SECS,
};
pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use resource::{ApiResource, HEADER_API_KEY, HEADER_API_VERSION, RequestOptions};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
