//! HTTP transport trait.
//!
//! [`HttpClient`] is the only thing the pipeline needs from the network: send
//! one request, get back one raw response. Implement it to plug in a
//! different HTTP stack or a stub for tests.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations must:
/// - honor [`Request::timeout`] and fail with [`crate::Error::Timeout`] when
///   it elapses;
/// - return `Ok` for every response that was received, including 4xx and 5xx;
/// - fail with a transport error ([`crate::Error::Connection`],
///   [`crate::Error::Tls`]) when no response was received.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.as_ref().execute(request)
    }
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
