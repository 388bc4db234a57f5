//! azdo-trigger: start Azure DevOps pipeline runs.
//!
//! A library for validating a pipeline run request, sending it to the
//! Azure DevOps REST API, and reporting a normalized outcome.

pub mod config;
pub mod secret;
pub mod transport;
pub mod trigger;
