//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. A response with a
/// non-success status is not an error here; it is returned as an
/// [`HttpResponse`](super::HttpResponse).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Renders this error together with its source chain, joined by `": "`.
    ///
    /// Transport libraries tend to keep the useful part ("connection
    /// refused", "dns error") a few levels down the chain.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = std::error::Error::source(self);

        // The Connection variant already prints its direct source.
        if matches!(self, Self::Connection(_)) {
            source = source.and_then(|e| e.source());
        }

        while let Some(err) = source {
            let text = err.to_string();
            if !detail.ends_with(&text) {
                detail.push_str(": ");
                detail.push_str(&text);
            }
            source = err.source();
        }

        detail
    }
}
