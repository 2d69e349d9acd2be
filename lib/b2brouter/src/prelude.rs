//! Prelude module for convenient imports.
//!
//! ```ignore
//! use b2brouter::prelude::*;
//! ```

pub use crate::{
    ApiError, ApiErrorKind, B2BRouterClient, ClientConfig, DocumentFormat, Error, HttpClient,
    HyperClient, Method, Params, RequestOptions, Result, StatusCode, to_params,
};
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
