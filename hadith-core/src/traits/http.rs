//! HTTP transport trait

use alloc::string::String;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code (0 when the transport reports none)
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking HTTP GET transport
///
/// Implementations own connection setup, TLS and timeouts. A call returns
/// once the request has definitely succeeded or failed; the caller decides
/// which status codes count as success.
pub trait HttpClient {
    /// Transport-level failure (no connection, timeout, TLS error)
    type Error: core::fmt::Debug;

    /// Perform a GET request and return the full response
    fn get(&mut self, url: &str) -> Result<HttpResponse, Self::Error>;
}

impl<T: HttpClient + ?Sized> HttpClient for &mut T {
    type Error = T::Error;

    fn get(&mut self, url: &str) -> Result<HttpResponse, Self::Error> {
        (**self).get(url)
    }
}
