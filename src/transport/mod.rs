//! Transport layer for sending HTTP requests to the remote API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod request;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{BasicAuth, HttpClient, HttpRequest, HttpResponse};
