//! Result types returned by the orchestrator.

use std::fmt;

use http::StatusCode;
use serde_json::Value;

/// Category of a failed trigger attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// One or more input fields are invalid.
    InvalidInput,
    /// Endpoint configuration is missing or unusable.
    Configuration,
    /// The remote call exceeded its time budget.
    Timeout,
    /// Any other transport failure.
    Network,
}

impl ErrorKind {
    /// Stable lowercase name, used in logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::Configuration => "configuration",
            Self::Timeout => "timeout",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerResult {
    /// Status returned by the remote API
    pub status: StatusCode,
    /// Normalized response body
    pub body: Value,
    /// `status < 400`
    pub succeeded: bool,
}

impl TriggerResult {
    /// Creates a result, deriving `succeeded` from the status.
    #[must_use]
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            succeeded: status.as_u16() < 400,
        }
    }
}

/// Outcome of one trigger attempt.
///
/// A remote status of 400 or above is still a [`Success`](Self::Success):
/// the call completed and the body is worth showing. Use
/// [`remediation_hint`](Self::remediation_hint) to get the advisory text
/// for that case.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// The remote API answered.
    Success(TriggerResult),
    /// The attempt failed before a response was received.
    Failure {
        /// Failure category
        kind: ErrorKind,
        /// User-facing message
        message: String,
    },
}

impl TriggerOutcome {
    /// Creates a failure outcome.
    #[must_use]
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Returns true only for a response with `status < 400`.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Success(result) if result.succeeded)
    }

    /// Returns the failure kind, if any.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failure { kind, .. } => Some(*kind),
            Self::Success(_) => None,
        }
    }

    /// Advisory text for a completed call with an error status.
    #[must_use]
    pub fn remediation_hint(&self) -> Option<String> {
        match self {
            Self::Success(result) if !result.succeeded => Some(format!(
                "Azure DevOps returned HTTP {}. Check pipeline ID, project name, branch ref, \
                 permissions, and PAT scopes.",
                result.status.as_u16()
            )),
            _ => None,
        }
    }

    /// The single message to show when the attempt did not succeed.
    ///
    /// Failures yield their message; error statuses yield the remediation hint.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failure { message, .. } => Some(message.clone()),
            Self::Success(_) => self.remediation_hint(),
        }
    }
}
