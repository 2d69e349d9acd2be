//! HTTP request descriptors.
//!
//! Use [`Request::builder`] to construct requests with headers, query parameters,
//! a body and a timeout. A built [`Request`] is immutable; the pipeline builds a
//! fresh one for every call.
//!
//! # Example
//!
//! ```
//! use b2brouter_core::{Request, Method};
//! use bytes::Bytes;
//! use std::time::Duration;
//!
//! let request = Request::<Bytes>::builder(Method::Get, "https://api.example.com/invoices".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query_pairs([("page".to_string(), "1".to_string())])
//!     .timeout(Duration::from_secs(10))
//!     .build();
//!
//! assert_eq!(request.url().as_str(), "https://api.example.com/invoices?page=1");
//! ```

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::Method;

/// An HTTP request with method, URL, headers, optional body and timeout.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    timeout: Option<Duration>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Per-request timeout the transport must honor, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Consume into (method, url, headers, body, timeout).
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        url::Url,
        HashMap<String, String>,
        Option<B>,
        Option<Duration>,
    ) {
        (self.method, self.url, self.headers, self.body, self.timeout)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    timeout: Option<Duration>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends multiple query parameters to the URL.
    ///
    /// An empty iterator leaves the URL untouched (no dangling `?`).
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_some() {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(&name, &value);
            }
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", crate::ContentType::Json.as_str())
            .body(body))
    }
}
