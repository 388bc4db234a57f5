//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments and environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Azure DevOps connection section
    #[serde(default)]
    pub azdo: AzdoSection,
}

/// Azure DevOps connection section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AzdoSection {
    /// Organization URL
    pub org_url: Option<String>,

    /// Personal access token
    pub pat: Option<String>,

    /// Project used when the request leaves it blank
    pub default_project: Option<String>,

    /// Ref used when the request leaves it blank
    pub default_ref: Option<String>,
}

impl std::fmt::Debug for AzdoSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzdoSection")
            .field("org_url", &self.org_url)
            .field("pat", &self.pat.as_ref().map(|_| crate::secret::REDACTED))
            .field("default_project", &self.default_project)
            .field("default_ref", &self.default_ref)
            .finish()
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# azdo-trigger Configuration File
#
# Every value can also be given on the command line or through the
# environment variable named next to it. Command line and environment
# take precedence over this file.

[azdo]
# Organization URL (AZDO_ORG_URL)
# org_url = "https://dev.azure.com/YourOrg"

# Personal access token with "Build (Read & execute)" scope (AZDO_PAT)
# Prefer the environment variable over storing the token here.
# pat = "your-token-here"

# Project used when --project is not given (AZDO_DEFAULT_PROJECT)
# default_project = "MyProject"

# Ref used when --ref is not given (AZDO_DEFAULT_REF, default: refs/heads/main)
# default_ref = "refs/heads/main"
"#
    .to_string()
}
