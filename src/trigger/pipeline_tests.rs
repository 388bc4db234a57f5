//! Tests for `PipelineTrigger`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;

use super::{ErrorKind, PipelineTrigger, RemoteEndpointConfig, TriggerOutcome, TriggerRequest};
use crate::secret::AccessToken;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

const PAT: &str = "s3cr3t-pat-value";

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: std::sync::Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            requests: std::sync::Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn responding(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(status, body.as_bytes().to_vec()))])
    }

    fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

#[derive(Debug, thiserror::Error)]
#[error("dns error")]
struct DnsError(#[source] std::io::Error);

fn test_config() -> RemoteEndpointConfig {
    RemoteEndpointConfig::new("https://dev.azure.com/contoso/", AccessToken::new(PAT))
}

fn valid_request() -> TriggerRequest {
    TriggerRequest::new("42", "MyProj", "refs/heads/main")
}

fn trigger_with(client: &Arc<MockClient>, config: RemoteEndpointConfig) -> PipelineTrigger<Arc<MockClient>> {
    PipelineTrigger::new(Arc::clone(client), config)
}

/// Asserts the token appears nowhere in the outcome.
fn assert_no_secret(outcome: &TriggerOutcome) {
    let rendered = match outcome {
        TriggerOutcome::Success(result) => format!("{} {}", result.status, result.body),
        TriggerOutcome::Failure { kind, message } => format!("{kind} {message}"),
    };
    assert!(!rendered.contains(PAT), "secret leaked: {rendered}");
    assert!(!format!("{outcome:?}").contains(PAT));
}

mod construction {
    use super::*;

    #[test]
    fn default_timeout_is_fifteen_seconds() {
        let client = Arc::new(MockClient::new(vec![]));
        let trigger = trigger_with(&client, test_config());

        assert_eq!(trigger.timeout(), Duration::from_secs(15));
        assert_eq!(trigger.config().org_base_url, "https://dev.azure.com/contoso/");
    }

    #[test]
    fn with_timeout_overrides() {
        let client = Arc::new(MockClient::new(vec![]));
        let trigger = trigger_with(&client, test_config()).with_timeout(Duration::from_secs(1));

        assert_eq!(trigger.timeout(), Duration::from_secs(1));
    }
}

mod success {
    use super::*;

    #[tokio::test]
    async fn json_response_is_returned() {
        let client = Arc::new(MockClient::responding(http::StatusCode::OK, r#"{"id":123}"#));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        let TriggerOutcome::Success(result) = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(result.status, http::StatusCode::OK);
        assert_eq!(result.body, json!({"id": 123}));
        assert!(result.succeeded);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn request_is_built_from_input() {
        let client = Arc::new(MockClient::responding(http::StatusCode::OK, "{}"));
        trigger_with(&client, test_config())
            .with_timeout(Duration::from_secs(3))
            .trigger(&TriggerRequest::new(" 42 ", "My Proj", "refs/heads/dev"))
            .await;

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);

        let req = &requests[0];
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(
            req.url.as_str(),
            "https://dev.azure.com/contoso/My%20Proj/_apis/pipelines/42/runs?api-version=7.1"
        );
        assert_eq!(req.timeout, Some(Duration::from_secs(3)));

        let auth = req.basic_auth.as_ref().unwrap();
        assert_eq!(auth.username, "");
        assert_eq!(auth.password.expose_secret(), PAT);

        let body: serde_json::Value =
            serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"resources": {"repositories": {"self": {"refName": "refs/heads/dev"}}}})
        );
    }

    #[tokio::test]
    async fn configured_defaults_fill_blank_fields() {
        let client = Arc::new(MockClient::responding(http::StatusCode::OK, "{}"));
        let config = test_config()
            .with_default_project("DefaultProj")
            .with_default_ref("refs/heads/release");

        trigger_with(&client, config)
            .trigger(&TriggerRequest::new("7", "", ""))
            .await;

        let req = &client.captured_requests()[0];
        assert!(req.url.path().starts_with("/contoso/DefaultProj/"));
        let body: serde_json::Value =
            serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body["resources"]["repositories"]["self"]["refName"],
            "refs/heads/release"
        );
    }
}

mod remote_error {
    use super::*;

    #[tokio::test]
    async fn not_found_with_empty_body_is_soft_failure() {
        let client = Arc::new(MockClient::responding(http::StatusCode::NOT_FOUND, ""));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        let TriggerOutcome::Success(result) = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(result.status, http::StatusCode::NOT_FOUND);
        assert_eq!(result.body, json!({}));
        assert!(!result.succeeded);
        assert!(outcome.remediation_hint().unwrap().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn html_error_page_is_wrapped() {
        let client = Arc::new(MockClient::responding(
            http::StatusCode::UNAUTHORIZED,
            "<html>Sign in</html>",
        ));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        let TriggerOutcome::Success(result) = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(result.body, json!({"raw": "<html>Sign in</html>"}));
    }

    #[tokio::test]
    async fn echoed_token_is_redacted_from_body() {
        let client = Arc::new(MockClient::responding(
            http::StatusCode::BAD_REQUEST,
            &format!(r#"{{"message":"bad token {PAT}"}}"#),
        ));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        assert_no_secret(&outcome);
        let TriggerOutcome::Success(result) = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(result.body, json!({"message": "bad token [REDACTED]"}));
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn invalid_pipeline_id_makes_no_call() {
        let client = Arc::new(MockClient::new(vec![]));
        let outcome = trigger_with(&client, test_config())
            .trigger(&TriggerRequest::new("abc", "MyProj", "refs/heads/main"))
            .await;

        assert_eq!(
            outcome,
            TriggerOutcome::failure(
                ErrorKind::InvalidInput,
                "Pipeline ID must be a numeric ID (e.g., 42)."
            )
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn slash_in_project_makes_no_call() {
        let client = Arc::new(MockClient::new(vec![]));
        let outcome = trigger_with(&client, test_config())
            .trigger(&TriggerRequest::new("42", "Team/Sub", "refs/heads/main"))
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidInput));
        assert!(
            outcome
                .error_message()
                .unwrap()
                .starts_with("Project must not contain '/'.")
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn dot_segment_project_makes_no_call() {
        let client = Arc::new(MockClient::new(vec![]));
        let outcome = trigger_with(&client, test_config())
            .trigger(&TriggerRequest::new("42", "..", "refs/heads/main"))
            .await;

        assert_eq!(
            outcome,
            TriggerOutcome::failure(ErrorKind::InvalidInput, "Project must not be '.' or '..'.")
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_input_reported_before_configuration() {
        let client = Arc::new(MockClient::new(vec![]));
        let outcome = trigger_with(&client, RemoteEndpointConfig::default())
            .trigger(&TriggerRequest::new("x", "P", "refs/heads/main"))
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidInput));
    }

    #[tokio::test]
    async fn missing_token_is_configuration_failure() {
        let client = Arc::new(MockClient::new(vec![]));
        let config =
            RemoteEndpointConfig::new("https://dev.azure.com/contoso", AccessToken::default());
        let outcome = trigger_with(&client, config).trigger(&valid_request()).await;

        assert_eq!(
            outcome,
            TriggerOutcome::failure(
                ErrorKind::Configuration,
                "Azure DevOps configuration missing (AZDO_ORG_URL or AZDO_PAT)."
            )
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_org_url_is_configuration_failure() {
        let client = Arc::new(MockClient::new(vec![]));
        let config = RemoteEndpointConfig::new("not a url", AccessToken::new(PAT));
        let outcome = trigger_with(&client, config).trigger(&valid_request()).await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::Configuration));
        assert_no_secret(&outcome);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn timeout_is_reported_with_retry_hint() {
        let client = Arc::new(MockClient::failing(HttpError::Timeout));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        assert_eq!(
            outcome,
            TriggerOutcome::failure(
                ErrorKind::Timeout,
                "Request to Azure DevOps timed out. Please retry."
            )
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn connection_error_includes_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such host");
        let client = Arc::new(MockClient::failing(HttpError::Connection(Box::new(
            DnsError(io),
        ))));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        assert_eq!(
            outcome,
            TriggerOutcome::failure(
                ErrorKind::Network,
                "Network error while contacting Azure DevOps: Connection error: dns error: \
                 no such host"
            )
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn network_detail_is_redacted() {
        let io = std::io::Error::other(format!("proxy rejected {PAT}"));
        let client = Arc::new(MockClient::failing(HttpError::Connection(Box::new(io))));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
        assert_no_secret(&outcome);
        assert!(outcome.error_message().unwrap().contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn invalid_url_from_transport_is_network_failure() {
        let client = Arc::new(MockClient::failing(HttpError::InvalidUrl(
            "builder error".to_string(),
        )));
        let outcome = trigger_with(&client, test_config())
            .trigger(&valid_request())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
    }
}

mod logging {
    use super::*;

    use std::io::Write;
    use std::sync::Mutex;

    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            CaptureWriter(Arc::clone(&self.0))
        }
    }

    impl Capture {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(ToString::to_string)
                .collect()
        }
    }

    /// Runs one trigger with a scoped subscriber and returns the log lines.
    async fn logged_attempt(client: MockClient, request: TriggerRequest) -> Vec<String> {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();

        let _guard = tracing::subscriber::set_default(subscriber);
        PipelineTrigger::new(client, test_config())
            .trigger(&request)
            .await;

        capture.lines()
    }

    fn count_level(lines: &[String], level: &str) -> usize {
        lines.iter().filter(|line| line.trim_start().starts_with(level)).count()
    }

    /// Asserts no line carries the token, the request URL or the body marker.
    fn assert_clean(lines: &[String]) {
        for line in lines {
            assert!(!line.contains(PAT), "token logged: {line}");
            assert!(!line.contains("_apis"), "URL logged: {line}");
            assert!(!line.contains("dev.azure.com"), "URL logged: {line}");
            assert!(!line.contains("body-marker"), "body logged: {line}");
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn completed_attempt_logs_one_info_event() {
        let client = MockClient::responding(
            http::StatusCode::OK,
            r#"{"id":123,"note":"body-marker"}"#,
        );
        let lines = logged_attempt(client, valid_request()).await;

        assert_eq!(count_level(&lines, "INFO"), 1, "{lines:?}");
        assert_eq!(count_level(&lines, "WARN"), 0);
        assert_eq!(count_level(&lines, "ERROR"), 0);

        let info = lines.iter().find(|l| l.trim_start().starts_with("INFO")).unwrap();
        assert!(info.contains("MyProj"));
        assert!(info.contains("pipeline_id"));
        assert!(info.contains("42"));
        assert!(info.contains("status=200"));
        assert_clean(&lines);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn remote_error_status_logs_info_with_status() {
        let client = MockClient::responding(http::StatusCode::NOT_FOUND, "body-marker");
        let lines = logged_attempt(client, valid_request()).await;

        assert_eq!(count_level(&lines, "INFO"), 1, "{lines:?}");
        assert!(lines.iter().any(|l| l.contains("status=404")));
        assert_clean(&lines);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn timeout_logs_one_warning() {
        let lines = logged_attempt(MockClient::failing(HttpError::Timeout), valid_request()).await;

        assert_eq!(count_level(&lines, "WARN"), 1, "{lines:?}");
        assert_eq!(count_level(&lines, "INFO"), 0);
        assert_eq!(count_level(&lines, "ERROR"), 0);
        assert!(lines.iter().any(|l| l.contains("MyProj") && l.contains("timeout")));
        assert_clean(&lines);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn network_failure_logs_one_error() {
        let io = std::io::Error::other(format!("reset by peer {PAT}"));
        let client = MockClient::failing(HttpError::Connection(Box::new(io)));
        let lines = logged_attempt(client, valid_request()).await;

        assert_eq!(count_level(&lines, "ERROR"), 1, "{lines:?}");
        assert_eq!(count_level(&lines, "INFO"), 0);
        assert!(lines.iter().any(|l| l.contains("MyProj") && l.contains("network")));
        assert_clean(&lines);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn configuration_failure_logs_one_error() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let config =
            RemoteEndpointConfig::new("https://dev.azure.com/contoso", AccessToken::default());
        PipelineTrigger::new(MockClient::new(vec![]), config)
            .trigger(&valid_request())
            .await;

        let lines = capture.lines();
        assert_eq!(count_level(&lines, "ERROR"), 1, "{lines:?}");
        assert!(lines.iter().any(|l| l.contains("configuration")));
    }
}
