//! Configuration layer for azdo-trigger.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Endpoint settings are resolved with the following priority (highest to lowest):
//!
//! 1. **CLI arguments** - including their environment variables
//!    (`AZDO_ORG_URL`, `AZDO_PAT`, `AZDO_DEFAULT_PROJECT`, `AZDO_DEFAULT_REF`)
//! 2. **TOML config file** - the `[azdo]` section
//! 3. **Built-in defaults** - only `default_ref` has one (`refs/heads/main`)
//!
//! Blank values count as unset at every level.
//!
//! # Missing Settings
//!
//! A missing organization URL or token is not a load error. The trigger
//! reports it as a configuration failure when a run is requested, so the
//! message is the same whichever front end drives it.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use self::toml::{AzdoSection, TomlConfig, default_config_template};
pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use validated::{OutputFormat, ValidatedConfig, write_default_config};
