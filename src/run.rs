//! Application execution logic.
//!
//! This module contains the async execution path that builds the mention
//! client from configuration, runs discovery, and delivers notifications.

use std::path::PathBuf;

use thiserror::Error;

use linkback::config::ValidatedConfig;
use linkback::http::{HttpClient, HttpError, ReqwestClient};
use linkback::mention::{MentionClient, MentionError, VouchProvider};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to construct the HTTP client.
    #[error("Failed to construct HTTP client: {0}")]
    Transport(#[source] HttpError),

    /// Failed to read the local source body file.
    #[error("Failed to read body file '{}': {source}", path.display())]
    BodyFileRead {
        /// Path to the body file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The source document URL was rejected.
    #[error("Invalid source document: {0}")]
    Source(#[source] MentionError),
}

/// Vouch provider backed by a single configured URL, offered for every
/// target.
#[derive(Debug, Clone)]
pub struct StaticVouch(String);

impl StaticVouch {
    /// Creates a provider that vouches with the given URL.
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self(url)
    }
}

impl VouchProvider for StaticVouch {
    fn possible_vouch_for(&self, _target: &str) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Executes a mention run.
///
/// This function:
/// 1. Builds the HTTP client from timeout and proxy settings
/// 2. Builds the mention client, fetching the source body or reading it
///    from a local file
/// 3. In dry-run mode, reports discovered endpoints without sending
/// 4. Otherwise delivers a notification to every supported target
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be constructed (bad proxy)
/// - The configured body file cannot be read
/// - The source URL is rejected
///
/// # Coverage Note
///
/// This function is excluded from coverage because it performs real
/// network requests.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let http = ReqwestClient::configured(config.timeout, config.proxy.as_deref())
        .map_err(RunError::Transport)?;

    let mut client = build_client(http, &config).await?;
    tracing::info!(
        "Found {} outbound link(s) in {}",
        client.links().len(),
        client.source_url()
    );

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - endpoints will be reported but nothing sent");
        report_discovery(&mut client).await;
    } else {
        let vouch = config.vouch.clone().map(StaticVouch::new);
        let accepted = client
            .send_supported_mentions(vouch.as_ref().map(|v| v as &dyn VouchProvider))
            .await;

        tracing::info!("{accepted} mention(s) accepted");
        for url in client.returned_urls() {
            tracing::info!("Endpoint returned status URL: {url}");
        }
    }

    if config.debug {
        print!("{}", client.debug_trace());
    }

    Ok(())
}

/// Builds the mention client, reading the source body from a local file
/// when one is configured and fetching it otherwise.
#[cfg(not(tarpaulin_include))]
async fn build_client<H: HttpClient>(
    http: H,
    config: &ValidatedConfig,
) -> Result<MentionClient<H>, RunError> {
    let mut client = match &config.body_file {
        Some(path) => {
            let body =
                std::fs::read_to_string(path).map_err(|e| RunError::BodyFileRead {
                    path: path.clone(),
                    source: e,
                })?;
            MentionClient::new(http, config.source_url.as_str(), &body)
                .map_err(RunError::Source)?
        }
        None => MentionClient::fetch(http, config.source_url.as_str())
            .await
            .map_err(RunError::Source)?,
    };

    if let Some(ref short_url) = config.short_url {
        client = client.with_short_url(short_url.clone());
    }

    Ok(client.with_debug(config.debug))
}

/// Probes every extracted link and logs the endpoints it advertises.
#[cfg(not(tarpaulin_include))]
async fn report_discovery<H: HttpClient>(client: &mut MentionClient<H>) {
    let links = client.links().to_vec();

    for link in &links {
        let webmention = client.supports_webmention(link).await;
        let pingback = client.supports_pingback(link).await;

        match (webmention, pingback) {
            (true, _) => {
                let endpoint = client.webmention_endpoint(link).unwrap_or("");
                tracing::info!("{link}: webmention endpoint {endpoint}");
            }
            (false, true) => {
                let endpoint = client.pingback_endpoint(link).unwrap_or("");
                tracing::info!("{link}: pingback endpoint {endpoint}");
            }
            (false, false) => {
                tracing::info!("{link}: no supported endpoint");
            }
        }
    }
}
