//! Pipeline run triggering.
//!
//! The flow for one attempt is:
//!
//! 1. [`validate`] checks the raw [`TriggerRequest`] and substitutes defaults
//! 2. [`build`] turns the [`ValidatedTriggerRequest`] into an [`OutboundCall`]
//! 3. the call is sent once through an [`HttpClient`](crate::transport::HttpClient)
//! 4. [`normalize`] shapes the response into `(status, body)`
//!
//! [`PipelineTrigger`] sequences these steps and reports a [`TriggerOutcome`].

mod builder;
mod error;
mod normalize;
mod outcome;
mod pipeline;
mod request;

#[cfg(test)]
mod pipeline_tests;

pub use builder::{EndpointError, OutboundCall, RemoteEndpointConfig, build};
pub use error::TriggerError;
pub use normalize::normalize;
pub use outcome::{ErrorKind, TriggerOutcome, TriggerResult};
pub use pipeline::PipelineTrigger;
pub use request::{
    RequestDefaults, TriggerRequest, ValidatedTriggerRequest, ValidationError, ValidationErrors,
    validate,
};
