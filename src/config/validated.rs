//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final configuration that is used by the
//! application.

use std::fmt;
use std::path::Path;

use crate::secret::AccessToken;
use crate::trigger::RemoteEndpointConfig;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// How the outcome is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON document on stdout
    Json,
}

/// Merged configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Remote endpoint settings handed to the trigger
    pub endpoint: RemoteEndpointConfig,

    /// Output format
    pub output: OutputFormat,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = &self.endpoint;
        let or_none = |value: &str| {
            if value.is_empty() {
                "none".to_string()
            } else {
                value.to_string()
            }
        };

        write!(
            f,
            "Config {{ org_url: {}, pat: {}, default_project: {}, default_ref: {} }}",
            or_none(endpoint.org_base_url.as_str()),
            if endpoint.access_token.is_blank() {
                "unset"
            } else {
                "set"
            },
            or_none(endpoint.default_project.as_deref().unwrap_or_default()),
            endpoint.request_defaults().ref_name,
        )
    }
}

impl ValidatedConfig {
    /// Creates a configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment variables) take precedence over
    /// TOML config values. Missing endpoint values are left empty.
    #[must_use]
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Self {
        let section = toml.map(|t| &t.azdo);

        let org_url = pick(cli.org_url.as_deref(), section.and_then(|s| s.org_url.as_deref()));
        let pat = pick(cli.pat.as_deref(), section.and_then(|s| s.pat.as_deref()));
        let default_project = pick(
            cli.default_project.as_deref(),
            section.and_then(|s| s.default_project.as_deref()),
        );
        let default_ref = pick(
            cli.default_ref.as_deref(),
            section.and_then(|s| s.default_ref.as_deref()),
        )
        .unwrap_or(defaults::REF_NAME);

        let endpoint = RemoteEndpointConfig {
            org_base_url: org_url.unwrap_or_default().to_string(),
            access_token: AccessToken::new(pat.unwrap_or_default()),
            default_project: default_project.map(ToString::to_string),
            default_ref: Some(default_ref.to_string()),
        };

        let output = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            endpoint,
            output,
            verbose: cli.verbose,
        }
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Ok(Self::from_raw(cli, toml.as_ref()))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Returns the first non-blank value, trimmed.
fn pick<'a>(primary: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}
