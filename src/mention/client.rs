//! Mention orchestrator owning the source document and its link set.

use url::Url;

use crate::http::{HttpClient, HttpRequest};

use super::discovery::EndpointResolver;
use super::error::MentionError;
use super::extract::extract_links;
use super::trace::DebugTrace;
use super::{pingback, webmention};

/// Supplies vouch URLs for outgoing webmentions.
///
/// A vouch is a third-party attestation URL that helps the receiving
/// endpoint with spam mitigation. The provider is consulted once per
/// target before sending.
pub trait VouchProvider {
    /// Returns a vouch URL that may convince `target` to accept a
    /// mention from this sender, if one is known.
    fn possible_vouch_for(&self, target: &str) -> Option<String>;
}

/// Sends Webmention and Pingback notifications for the outbound links
/// of a source document.
///
/// The document and its link set are fixed at construction. Endpoint
/// discovery is memoized per target for the lifetime of the client;
/// nothing is persisted across clients.
///
/// # Example
///
/// ```no_run
/// use linkback::http::ReqwestClient;
/// use linkback::mention::MentionClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = MentionClient::fetch(ReqwestClient::new(), "https://a.example/post").await?;
/// let accepted = client.send_supported_mentions(None).await;
/// println!("{accepted} mention(s) accepted");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MentionClient<H> {
    http: H,
    source_url: Url,
    short_url: Option<String>,
    links: Vec<String>,
    resolver: EndpointResolver,
    returned_urls: Vec<String>,
    trace: DebugTrace,
}

impl<H: HttpClient> MentionClient<H> {
    /// Creates a mention client from a source URL and an already-fetched
    /// document body.
    ///
    /// Outbound links are extracted immediately and never change.
    ///
    /// # Errors
    ///
    /// Returns [`MentionError::InvalidSourceUrl`] if the source URL does
    /// not parse; nothing useful can proceed without one.
    pub fn new(http: H, source_url: &str, source_body: &str) -> Result<Self, MentionError> {
        let parsed = Url::parse(source_url).map_err(|e| MentionError::InvalidSourceUrl {
            url: source_url.to_string(),
            source: e,
        })?;

        Ok(Self::from_parts(http, parsed, source_body))
    }

    /// Creates a mention client by fetching the source document body.
    ///
    /// A fetch failure degrades to an empty body (and therefore an empty
    /// link set) with a warning; transport failures are never hard
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`MentionError::InvalidSourceUrl`] if the source URL does
    /// not parse.
    pub async fn fetch(http: H, source_url: &str) -> Result<Self, MentionError> {
        let parsed = Url::parse(source_url).map_err(|e| MentionError::InvalidSourceUrl {
            url: source_url.to_string(),
            source: e,
        })?;

        let body = match http.request(HttpRequest::get(parsed.clone())).await {
            Ok(response) => String::from_utf8_lossy(&response.body).into_owned(),
            Err(e) => {
                tracing::warn!(source = %parsed, error = %e, "failed to fetch source document");
                String::new()
            }
        };

        Ok(Self::from_parts(http, parsed, &body))
    }

    fn from_parts(http: H, source_url: Url, source_body: &str) -> Self {
        Self {
            http,
            source_url,
            short_url: None,
            links: extract_links(source_body),
            resolver: EndpointResolver::new(),
            returned_urls: Vec::new(),
            trace: DebugTrace::default(),
        }
    }

    /// Sets the short URL substituted as the webmention `source` for
    /// shortener-sensitive receivers.
    #[must_use]
    pub fn with_short_url(mut self, short_url: impl Into<String>) -> Self {
        self.short_url = Some(short_url.into());
        self
    }

    /// Enables or disables debug trace collection at construction.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.trace.set_enabled(enabled);
        self
    }

    /// Enables or disables debug trace collection.
    pub const fn set_debug(&mut self, enabled: bool) {
        self.trace.set_enabled(enabled);
    }

    /// Returns the collected debug trace.
    #[must_use]
    pub fn debug_trace(&self) -> &str {
        self.trace.as_str()
    }

    /// Returns the source document URL.
    #[must_use]
    pub const fn source_url(&self) -> &Url {
        &self.source_url
    }

    /// Returns the extracted outbound links, deduplicated in order of
    /// first appearance.
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Returns the URLs returned by accepting webmention endpoints, in
    /// delivery order.
    #[must_use]
    pub fn returned_urls(&self) -> &[String] {
        &self.returned_urls
    }

    /// Returns whether the target supports Webmention. Memoized.
    pub async fn supports_webmention(&mut self, target: &str) -> bool {
        self.resolver
            .supports_webmention(&self.http, target, &mut self.trace)
            .await
    }

    /// Returns whether the target supports Pingback. Memoized.
    pub async fn supports_pingback(&mut self, target: &str) -> bool {
        self.resolver
            .supports_pingback(&self.http, target, &mut self.trace)
            .await
    }

    /// Returns the discovered webmention endpoint for a target, if
    /// discovery has run and found one.
    #[must_use]
    pub fn webmention_endpoint(&self, target: &str) -> Option<&str> {
        self.resolver.webmention_endpoint(target)
    }

    /// Returns the discovered pingback endpoint for a target, if
    /// discovery has run and found one.
    #[must_use]
    pub fn pingback_endpoint(&self, target: &str) -> Option<&str> {
        self.resolver.pingback_endpoint(target)
    }

    /// Sends a webmention to the target's discovered endpoint.
    ///
    /// Returns false when no endpoint is known for the target (run
    /// discovery first) or when the endpoint did not accept. A URL
    /// returned by the endpoint is appended to [`Self::returned_urls`].
    pub async fn send_webmention_payload(&mut self, target: &str, vouch: Option<&str>) -> bool {
        self.trace.push("Sending webmention now!");

        let Some(endpoint) = self
            .resolver
            .webmention_endpoint(target)
            .map(ToString::to_string)
        else {
            self.trace.push("No webmention server known for this target");
            return false;
        };
        self.trace
            .push(&format!("Sending to webmention server: {endpoint}"));

        let source = self.webmention_source(target);
        let delivery = webmention::send(&self.http, &endpoint, &source, target, vouch).await;

        if let Some(url) = delivery.returned_url {
            self.returned_urls.push(url);
        }

        delivery.accepted
    }

    /// Sends a pingback to the target's discovered endpoint.
    ///
    /// Returns false when no endpoint is known for the target (run
    /// discovery first) or when the endpoint replied with a fault.
    pub async fn send_pingback_payload(&mut self, target: &str) -> bool {
        self.trace.push("Sending pingback now!");

        let Some(endpoint) = self
            .resolver
            .pingback_endpoint(target)
            .map(ToString::to_string)
        else {
            self.trace.push("No pingback server known for this target");
            return false;
        };
        self.trace
            .push(&format!("Sending to pingback server: {endpoint}"));

        pingback::send(&self.http, &endpoint, self.source_url.as_str(), target).await
    }

    /// Notifies a single target, preferring Webmention over Pingback.
    ///
    /// Pingback is probed only if webmention discovery failed; at most
    /// one notification is sent. Returns 1 if it was accepted, else 0.
    pub async fn send_supported_mentions_to_link(
        &mut self,
        target: &str,
        vouch: Option<&str>,
    ) -> usize {
        let accepted = if self.supports_webmention(target).await {
            self.send_webmention_payload(target, vouch).await
        } else if self.supports_pingback(target).await {
            self.send_pingback_payload(target).await
        } else {
            false
        };

        usize::from(accepted)
    }

    /// Notifies every extracted link, in extraction order, and returns
    /// the number of accepted notifications.
    ///
    /// When a vouch provider is given it is consulted once per target.
    pub async fn send_supported_mentions(
        &mut self,
        vouch: Option<&dyn VouchProvider>,
    ) -> usize {
        let links = self.links.clone();
        let mut total_accepted = 0;

        for link in &links {
            self.trace.push(&format!("Checking {link}"));
            let token = vouch.and_then(|provider| provider.possible_vouch_for(link));
            total_accepted += self
                .send_supported_mentions_to_link(link, token.as_deref())
                .await;
            self.trace.push("");
        }

        total_accepted
    }

    /// Picks the webmention `source` parameter: the short URL for
    /// shortener-sensitive receivers when one is configured, otherwise
    /// the full source URL.
    fn webmention_source(&self, target: &str) -> String {
        match &self.short_url {
            Some(short) if webmention::prefers_short_source(target) => short.clone(),
            _ => self.source_url.to_string(),
        }
    }
}
