//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::trigger::TriggerRequest;

use super::defaults;

/// azdo-trigger: start an Azure DevOps pipeline run
///
/// Validates the pipeline ID, project and branch ref, then queues one run
/// through the Azure DevOps REST API.
#[derive(Debug, Parser)]
#[command(name = "azdo-trigger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Numeric pipeline definition ID
    #[arg(long = "pipeline-id", value_name = "ID")]
    pub pipeline_id: Option<String>,

    /// Project display name (falls back to the default project)
    #[arg(long)]
    pub project: Option<String>,

    /// Git ref to run against (falls back to the default ref)
    #[arg(long = "ref", value_name = "REF")]
    pub ref_name: Option<String>,

    /// Organization URL, e.g. `https://dev.azure.com/YourOrg`
    #[arg(long = "org-url", env = "AZDO_ORG_URL")]
    pub org_url: Option<String>,

    /// Personal access token
    #[arg(long, env = "AZDO_PAT", hide_env_values = true)]
    pub pat: Option<String>,

    /// Project used when --project is blank
    #[arg(long = "default-project", env = "AZDO_DEFAULT_PROJECT")]
    pub default_project: Option<String>,

    /// Ref used when --ref is blank (built-in fallback: refs/heads/main)
    #[arg(long = "default-ref", env = "AZDO_DEFAULT_REF")]
    pub default_ref: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for azdo-trigger
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Builds the raw trigger input; absent flags become empty strings.
    #[must_use]
    pub fn trigger_request(&self) -> TriggerRequest {
        TriggerRequest::new(
            self.pipeline_id.clone().unwrap_or_default(),
            self.project.clone().unwrap_or_default(),
            self.ref_name.clone().unwrap_or_default(),
        )
    }
}
