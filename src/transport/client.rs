//! Production HTTP client implementation using reqwest.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// This is a thin wrapper around `reqwest::Client` that implements
/// the [`HttpClient`] trait. Per-request timeouts and Basic credentials
/// carried by [`HttpRequest`] are applied to each call.
///
/// # Example
///
/// ```no_run
/// use azdo_trigger::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://dev.azure.com/contoso/MyProj/_apis/pipelines/42/runs?api-version=7.1")?;
/// let request = HttpRequest::post(url).with_timeout(Duration::from_secs(15));
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a reqwest error onto the transport taxonomy.
///
/// The URL is dropped from the error so callers can surface the message
/// without echoing the endpoint.
fn map_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.without_url().to_string())
    } else {
        HttpError::Connection(Box::new(e.without_url()))
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(auth) = &req.basic_auth {
            builder = builder.basic_auth(&auth.username, Some(auth.password.expose_secret()));
        }

        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_error)?.to_vec();

        Ok(HttpResponse::new(status, body))
    }
}
