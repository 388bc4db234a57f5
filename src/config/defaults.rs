//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Git ref used when neither the request nor the configuration names one.
pub const REF_NAME: &str = "refs/heads/main";

/// Pipelines REST API version sent with every run request.
pub const API_VERSION: &str = "7.1";

/// Upper bound for one run request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Maximum number of characters kept from a non-JSON response body.
pub const RAW_BODY_LIMIT: usize = 2000;

/// Default output path for the `init` subcommand.
pub const CONFIG_FILE: &str = "azdo-trigger.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
