//! The trigger orchestrator.

use std::time::Duration;

use crate::config::defaults;
use crate::secret::AccessToken;
use crate::transport::{HttpClient, HttpError};

use super::{
    RemoteEndpointConfig, TriggerError, TriggerOutcome, TriggerRequest, TriggerResult,
    ValidatedTriggerRequest, build, normalize, validate,
};

/// Starts pipeline runs against one configured organization.
///
/// Each call to [`trigger`](Self::trigger) is self-contained: validate,
/// build, send exactly once, normalize. No retries and no shared mutable
/// state, so one instance can serve concurrent callers.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
///
/// # Example
///
/// ```no_run
/// use azdo_trigger::secret::AccessToken;
/// use azdo_trigger::transport::ReqwestClient;
/// use azdo_trigger::trigger::{PipelineTrigger, RemoteEndpointConfig, TriggerRequest};
///
/// # async fn example() {
/// let config = RemoteEndpointConfig::new("https://dev.azure.com/contoso", AccessToken::new("pat"));
/// let trigger = PipelineTrigger::new(ReqwestClient::new(), config);
///
/// let outcome = trigger
///     .trigger(&TriggerRequest::new("42", "MyProj", "refs/heads/main"))
///     .await;
/// println!("{outcome:?}");
/// # }
/// ```
#[derive(Debug)]
pub struct PipelineTrigger<H> {
    client: H,
    config: RemoteEndpointConfig,
    timeout: Duration,
}

impl<H> PipelineTrigger<H> {
    /// Creates an orchestrator with the default 15 second timeout.
    #[must_use]
    pub const fn new(client: H, config: RemoteEndpointConfig) -> Self {
        Self {
            client,
            config,
            timeout: defaults::request_timeout(),
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint configuration.
    #[must_use]
    pub const fn config(&self) -> &RemoteEndpointConfig {
        &self.config
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<H: HttpClient> PipelineTrigger<H> {
    /// Runs one trigger attempt and folds every failure into the outcome.
    ///
    /// The access token is scrubbed from every message and body string of
    /// the returned outcome.
    pub async fn trigger(&self, raw: &TriggerRequest) -> TriggerOutcome {
        match self.attempt(raw).await {
            Ok(result) => TriggerOutcome::Success(result),
            Err(e) => {
                let message = self.config.access_token.redact(&e.to_string());
                TriggerOutcome::failure(e.kind(), message)
            }
        }
    }

    async fn attempt(&self, raw: &TriggerRequest) -> Result<TriggerResult, TriggerError> {
        let req = validate(raw, &self.config.request_defaults()).inspect_err(|errors| {
            tracing::debug!(
                project = raw.project.trim(),
                pipeline_id = raw.pipeline_id.trim(),
                kind = "invalid_input",
                "Rejected trigger request: {errors}"
            );
        })?;

        let call = build(&req, &self.config).inspect_err(|e| {
            tracing::error!(kind = "configuration", "Configuration error: {e}");
        })?;

        let response = self
            .client
            .request(call.into_request(self.timeout))
            .await
            .map_err(|e| transport_failure(&req, &self.config.access_token, &e))?;

        let (status, mut body) = normalize(response.status, &response.body_text_lossy());
        self.config.access_token.redact_json(&mut body);

        tracing::info!(
            project = req.project(),
            pipeline_id = req.pipeline_id(),
            status = status.as_u16(),
            "Triggered Azure DevOps pipeline"
        );

        Ok(TriggerResult::new(status, body))
    }
}

/// Logs a transport failure and maps it onto the trigger taxonomy.
///
/// The detail is redacted before it is logged or returned.
fn transport_failure(
    req: &ValidatedTriggerRequest,
    token: &AccessToken,
    error: &HttpError,
) -> TriggerError {
    if matches!(error, HttpError::Timeout) {
        tracing::warn!(
            project = req.project(),
            pipeline_id = req.pipeline_id(),
            kind = "timeout",
            "Timeout triggering pipeline"
        );
        return TriggerError::Timeout;
    }

    let detail = token.redact(&error.detail());
    tracing::error!(
        project = req.project(),
        pipeline_id = req.pipeline_id(),
        kind = "network",
        error = %detail,
        "Network error triggering pipeline"
    );
    TriggerError::Network(detail)
}
