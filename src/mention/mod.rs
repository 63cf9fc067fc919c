//! Webmention and Pingback endpoint discovery and delivery.
//!
//! This module provides:
//! - Outbound link extraction from HTML ([`extract_links`])
//! - Header field parsing and canonicalization ([`HeaderFields`])
//! - Per-target memoized endpoint discovery ([`EndpointResolver`], [`Probe`])
//! - Protocol payloads and response interpretation ([`pingback`], [`webmention`])
//! - The orchestrator tying it together ([`MentionClient`])
//!
//! # Discovery order
//!
//! For each target the orchestrator checks Webmention first and probes
//! Pingback only when no Webmention endpoint was found; at most one
//! notification is sent per target. Fetched headers and bodies are cached
//! per target and shared between the two discovery pipelines, so a body
//! fetched while looking for a pingback endpoint is reused by webmention
//! discovery and vice versa.

mod cache;
mod client;
mod discovery;
mod error;
mod extract;
mod headers;
pub mod pingback;
mod trace;
pub mod webmention;


pub use cache::{DiscoveryCache, Probe, TargetRecord};
pub use client::{MentionClient, VouchProvider};
pub use discovery::EndpointResolver;
pub use error::MentionError;
pub use extract::extract_links;
pub use headers::HeaderFields;
pub use trace::DebugTrace;
pub use webmention::Delivery;
