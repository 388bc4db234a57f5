//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use azdo_trigger::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    use azdo_trigger::trigger::{ErrorKind, TriggerOutcome};

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration or input error (exit code 1) - invalid args, missing settings, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, timeout, remote error status.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Numeric exit status for an outcome.
    #[must_use]
    pub const fn code_for(outcome: &TriggerOutcome) -> u8 {
        match outcome {
            TriggerOutcome::Success(result) if result.succeeded => 0,
            TriggerOutcome::Success(_) => 2,
            TriggerOutcome::Failure { kind, .. } => match kind {
                ErrorKind::InvalidInput | ErrorKind::Configuration => 1,
                ErrorKind::Timeout | ErrorKind::Network => 2,
            },
        }
    }

    /// Exit code for an outcome.
    pub fn for_outcome(outcome: &TriggerOutcome) -> ExitCode {
        ExitCode::from(code_for(outcome))
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'azdo-trigger init' to generate a configuration template.");
        }
        ConfigError::TomlParse(_) => {
            eprintln!("\nExpected an [azdo] section with org_url, pat, default_project, default_ref.");
        }
        ConfigError::FileWrite { .. } => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout stays clean for the outcome.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
