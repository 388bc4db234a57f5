//! Failure taxonomy for a trigger attempt.

use thiserror::Error;

use super::{EndpointError, ErrorKind, ValidationErrors};

/// Everything that can stop an attempt before a response arrives.
///
/// The `Display` text of each variant is the user-facing message.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Input validation failed.
    #[error(transparent)]
    InvalidInput(#[from] ValidationErrors),

    /// Endpoint configuration is missing or unusable.
    #[error(transparent)]
    Configuration(#[from] EndpointError),

    /// The remote call exceeded its time budget.
    #[error("Request to Azure DevOps timed out. Please retry.")]
    Timeout,

    /// Any other transport failure.
    #[error("Network error while contacting Azure DevOps: {0}")]
    Network(String),
}

impl TriggerError {
    /// Maps the error onto its [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Timeout => ErrorKind::Timeout,
            Self::Network(_) => ErrorKind::Network,
        }
    }
}
