//! Request/response logging middleware.
//!
//! Logs every exchange with `tracing`. At debug level request headers are
//! included, with the API key header replaced by [`REDACTED`].

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, HEADER_API_KEY, Request, Response, Result};

/// Placeholder logged instead of secret header values.
pub const REDACTED: &str = "<redacted>";

/// Copy `headers` for logging, hiding the API key.
///
/// The result is sorted by name so log lines are stable.
#[must_use]
pub fn redact_headers<'a>(
    headers: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> BTreeMap<&'a str, &'a str> {
    headers
        .into_iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case(HEADER_API_KEY) {
                (name.as_str(), REDACTED)
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

/// Layer that adds request/response logging.
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
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "b2brouter_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            method = %method,
                            url = %url,
                            headers = ?redact_headers(request.headers()),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!(method = %method, url = %url, "sending request");
                    }
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        if response.is_error() {
                            warn!(status, elapsed_ms, "request answered with HTTP error");
                        } else {
                            info!(status, elapsed_ms, "request completed");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
