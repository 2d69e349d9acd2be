//! Prelude module for convenient imports.
//!
//! ```ignore
//! use b2brouter_core::prelude::*;
//! ```

pub use crate::{
    ApiError, ApiErrorKind, ApiResource, ClientConfig, ContentType, Error, HttpClient, Method,
    Params, Request, RequestBuilder, RequestOptions, Response, Result, from_json, to_json,
    to_params,
};
