//! Translation of a validated request into an authenticated API call.

use std::fmt;
use std::time::Duration;

use http::HeaderValue;
use http::header::{ACCEPT, CONTENT_TYPE};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use url::Url;

use crate::config::defaults;
use crate::secret::AccessToken;
use crate::transport::HttpRequest;

use super::{RequestDefaults, ValidatedTriggerRequest};

/// Characters left as-is in the project path segment; everything else is encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Connection settings for the remote pipelines API.
///
/// Read-only once built; the orchestrator borrows it for every attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteEndpointConfig {
    /// Organization URL, e.g. `https://dev.azure.com/contoso`
    pub org_base_url: String,
    /// Personal access token
    pub access_token: AccessToken,
    /// Project used when the request leaves it blank
    pub default_project: Option<String>,
    /// Ref used when the request leaves it blank
    pub default_ref: Option<String>,
}

impl RemoteEndpointConfig {
    /// Creates a configuration without defaults.
    #[must_use]
    pub fn new(org_base_url: impl Into<String>, access_token: AccessToken) -> Self {
        Self {
            org_base_url: org_base_url.into(),
            access_token,
            default_project: None,
            default_ref: None,
        }
    }

    /// Sets the default project.
    #[must_use]
    pub fn with_default_project(mut self, project: impl Into<String>) -> Self {
        self.default_project = Some(project.into());
        self
    }

    /// Sets the default ref.
    #[must_use]
    pub fn with_default_ref(mut self, ref_name: impl Into<String>) -> Self {
        self.default_ref = Some(ref_name.into());
        self
    }

    /// Returns the values substituted for blank request fields.
    ///
    /// A missing or blank default ref falls back to `refs/heads/main`.
    #[must_use]
    pub fn request_defaults(&self) -> RequestDefaults {
        let ref_name = self
            .default_ref
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(defaults::REF_NAME);

        RequestDefaults {
            project: self.default_project.clone().unwrap_or_default(),
            ref_name: ref_name.to_string(),
        }
    }
}

/// Operator-side configuration fault detected while building the call.
///
/// Never caused by user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Organization URL or access token is blank.
    #[error("Azure DevOps configuration missing (AZDO_ORG_URL or AZDO_PAT).")]
    Missing,

    /// Organization URL does not form a valid absolute URL.
    #[error("Azure DevOps organization URL is invalid: {reason}")]
    InvalidUrl {
        /// Parser message
        reason: String,
    },
}

/// A fully-formed "run pipeline" call, ready to hand to a transport.
///
/// `Debug` never prints the credential.
#[derive(Clone)]
pub struct OutboundCall {
    url: Url,
    credential: AccessToken,
    payload: serde_json::Value,
}

impl fmt::Debug for OutboundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundCall")
            .field("url", &self.url.as_str())
            .field("credential", &self.credential)
            .field("payload", &self.payload)
            .finish()
    }
}

impl OutboundCall {
    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// JSON body.
    #[must_use]
    pub const fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Converts the call into a POST request with Basic auth and a timeout.
    #[must_use]
    pub fn into_request(self, timeout: Duration) -> HttpRequest {
        let json = HeaderValue::from_static("application/json");

        HttpRequest::post(self.url)
            .with_header(CONTENT_TYPE, json.clone())
            .with_header(ACCEPT, json)
            .with_basic_auth("", self.credential)
            .with_timeout(timeout)
            .with_body(self.payload.to_string().into_bytes())
    }
}

/// Builds the run request for `req` against the endpoint in `cfg`.
///
/// Pure data transformation; no I/O.
///
/// # Errors
///
/// - [`EndpointError::Missing`] if the organization URL or token is blank
/// - [`EndpointError::InvalidUrl`] if the resulting URL does not parse
pub fn build(
    req: &ValidatedTriggerRequest,
    cfg: &RemoteEndpointConfig,
) -> Result<OutboundCall, EndpointError> {
    let base = cfg.org_base_url.trim();
    if base.is_empty() || cfg.access_token.is_blank() {
        return Err(EndpointError::Missing);
    }

    let project = utf8_percent_encode(req.project(), PATH_SEGMENT);
    let raw_url = format!(
        "{}/{project}/_apis/pipelines/{}/runs?api-version={}",
        base.trim_end_matches('/'),
        req.pipeline_id(),
        defaults::API_VERSION,
    );

    let url = Url::parse(&raw_url).map_err(|e| EndpointError::InvalidUrl {
        reason: e.to_string(),
    })?;

    let payload = serde_json::json!({
        "resources": {
            "repositories": {
                "self": { "refName": req.ref_name() }
            }
        }
    });

    Ok(OutboundCall {
        url,
        credential: cfg.access_token.clone(),
        payload,
    })
}
