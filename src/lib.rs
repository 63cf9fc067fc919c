//! Linkback: Webmention and Pingback notifier
//!
//! A library for discovering remote notification endpoints (Webmention
//! and Pingback) for outbound links in published content and sending
//! protocol-correct notifications.

pub mod config;
pub mod http;
pub mod mention;
