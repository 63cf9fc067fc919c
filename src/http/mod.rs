//! HTTP transport layer for discovery probes and notification delivery.
//!
//! This module provides:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod transport;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use transport::{HttpClient, HttpRequest, HttpResponse};
