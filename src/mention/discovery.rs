//! Endpoint discovery for Webmention and Pingback.
//!
//! Discovery for each protocol is a two-step pipeline: probe the response
//! headers first (HEAD), then fall back to scanning the response body
//! (GET). Every step is memoized per target in a [`DiscoveryCache`];
//! network failures cache as negatives and are never retried.
//!
//! Endpoint advertisements are matched with regex scans over the raw
//! header and body text rather than a full HTML parse.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::http::{HttpClient, HttpRequest};

use super::cache::{DiscoveryCache, Probe};
use super::headers::HeaderFields;
use super::trace::DebugTrace;

/// `<link rel="pingback" href="...">`, single- or double-quoted,
/// optionally self-closing.
static PINGBACK_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link rel=["']pingback["'] href=["']([^"']+)["'] ?/?>"#)
        .expect("valid pingback link pattern")
});

/// HTML `<link>`/`<a>` webmention relations, in priority order: the
/// `webmention` token first, then the legacy `http://webmention.org/`
/// URI form, each with either attribute order.
static WEBMENTION_HTML: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r#"(?i)<(?:link|a) +href="([^"]+)" +rel="webmention" */?>"#,
        r#"(?i)<(?:link|a) +rel="webmention" +href="([^"]+)" */?>"#,
        r#"(?i)<(?:link|a) +href="([^"]+)" +rel="http://webmention\.org/?" */?>"#,
        r#"(?i)<(?:link|a) +rel="http://webmention\.org/?" +href="([^"]+)" */?>"#,
    ]
    .map(|pattern| Regex::new(pattern).expect("valid webmention html pattern"))
});

/// Link-header webmention relations, `webmention` token before the
/// legacy URI form (trailing slash optional).
static WEBMENTION_LINK_HEADER: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        r#"<((?:https?://)?[^>]+)>; rel="webmention""#,
        r#"<((?:https?://)?[^>]+)>; rel="http://webmention\.org/?""#,
    ]
    .map(|pattern| Regex::new(pattern).expect("valid webmention link-header pattern"))
});

/// The `scheme://host` prefix of a URL, used to absolutize relative
/// endpoints.
static SCHEME_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://[^/]+").expect("valid scheme-host pattern"));

/// Finds a webmention endpoint advertised in an HTML body.
#[must_use]
pub(crate) fn find_webmention_endpoint_in_html(body: &str) -> Option<String> {
    WEBMENTION_HTML
        .iter()
        .find_map(|re| re.captures(body).map(|caps| caps[1].to_string()))
}

/// Finds a webmention endpoint advertised in a Link header value.
///
/// `link_header` is the full header value; repeated Link headers should
/// be joined with `", "` before matching.
#[must_use]
pub(crate) fn find_webmention_endpoint_in_header(link_header: &str) -> Option<String> {
    WEBMENTION_LINK_HEADER
        .iter()
        .find_map(|re| re.captures(link_header).map(|caps| caps[1].to_string()))
}

/// Finds a pingback endpoint advertised in an HTML body.
#[must_use]
pub(crate) fn find_pingback_endpoint_in_html(body: &str) -> Option<String> {
    PINGBACK_LINK
        .captures(body)
        .map(|caps| caps[1].to_string())
}

/// Prepends the target's `scheme://host` prefix to an endpoint that does
/// not start with an http/https scheme. Absolute endpoints pass through
/// untouched; so does a relative endpoint when no prefix can be derived.
#[must_use]
pub(crate) fn absolutize_endpoint(endpoint: &str, target: &str) -> String {
    if has_http_scheme(endpoint) {
        return endpoint.to_string();
    }

    SCHEME_HOST.find(target).map_or_else(
        || endpoint.to_string(),
        |prefix| format!("{}{endpoint}", prefix.as_str()),
    )
}

fn has_http_scheme(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

/// Resolves notification endpoints for target URLs, memoizing every
/// probe per target for the resolver's lifetime.
#[derive(Debug, Default)]
pub struct EndpointResolver {
    cache: DiscoveryCache,
}

impl EndpointResolver {
    /// Creates a resolver with an empty discovery cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the target supports Pingback, probing at most once.
    ///
    /// First probe: HEAD, looking for an `X-Pingback` header. Fallback:
    /// GET, scanning for `<link rel="pingback">`. A fetch failure in
    /// either step means "unsupported", cached and never retried.
    pub async fn supports_pingback<H: HttpClient>(
        &mut self,
        http: &H,
        target: &str,
        trace: &mut DebugTrace,
    ) -> bool {
        if self.cache.record(target).pingback.is_unknown() {
            let endpoint = self.discover_pingback(http, target, trace).await;
            trace.push(&format!(
                "pingback server: {}",
                endpoint.as_deref().unwrap_or("")
            ));
            self.cache.record(target).pingback = Probe::from(endpoint);
        }

        self.cache.record(target).pingback.is_found()
    }

    /// Returns whether the target supports Webmention, probing at most once.
    ///
    /// First probe: HEAD, matching a `Link` header `webmention` relation
    /// (or the legacy `http://webmention.org/` form). Fallback: GET,
    /// scanning for an equivalent `<link>`/`<a>` element. Relative
    /// endpoints from either step are corrected against the target.
    pub async fn supports_webmention<H: HttpClient>(
        &mut self,
        http: &H,
        target: &str,
        trace: &mut DebugTrace,
    ) -> bool {
        if self.cache.record(target).webmention.is_unknown() {
            let endpoint = self.discover_webmention(http, target, trace).await;
            trace.push(&format!(
                "webmention server: {}",
                endpoint.as_deref().unwrap_or("")
            ));
            self.cache.record(target).webmention = Probe::from(endpoint);
        }

        self.cache.record(target).webmention.is_found()
    }

    /// Returns the discovered pingback endpoint, if discovery found one.
    #[must_use]
    pub fn pingback_endpoint(&self, target: &str) -> Option<&str> {
        self.cache
            .get(target)
            .and_then(|record| record.pingback.value())
            .map(String::as_str)
    }

    /// Returns the discovered webmention endpoint, if discovery found one.
    #[must_use]
    pub fn webmention_endpoint(&self, target: &str) -> Option<&str> {
        self.cache
            .get(target)
            .and_then(|record| record.webmention.value())
            .map(String::as_str)
    }

    async fn discover_pingback<H: HttpClient>(
        &mut self,
        http: &H,
        target: &str,
        trace: &mut DebugTrace,
    ) -> Option<String> {
        self.ensure_headers(http, target, trace).await;

        let from_header = self
            .cache
            .record(target)
            .headers
            .value()
            .and_then(|headers| headers.get("X-Pingback"))
            .map(ToString::to_string);

        if let Some(endpoint) = from_header {
            trace.push("Found pingback server in header");
            return Some(endpoint);
        }

        trace.push("No pingback server found in header, looking in the body now");
        self.ensure_body(http, target, trace).await;

        self.cache
            .record(target)
            .body
            .value()
            .and_then(|body| find_pingback_endpoint_in_html(body))
    }

    async fn discover_webmention<H: HttpClient>(
        &mut self,
        http: &H,
        target: &str,
        trace: &mut DebugTrace,
    ) -> Option<String> {
        self.ensure_headers(http, target, trace).await;

        let link_header = self
            .cache
            .record(target)
            .headers
            .value()
            .and_then(|headers| headers.joined("Link"));

        if let Some(endpoint) = link_header
            .as_deref()
            .and_then(find_webmention_endpoint_in_header)
        {
            trace.push("Found webmention server in header");
            return Some(fix_relative_endpoint(endpoint, target, trace));
        }

        trace.push("No webmention server found in header, looking in the body now");
        self.ensure_body(http, target, trace).await;

        let endpoint = self
            .cache
            .record(target)
            .body
            .value()
            .and_then(|body| find_webmention_endpoint_in_html(body))?;

        Some(fix_relative_endpoint(endpoint, target, trace))
    }

    /// Fetches the target's response headers if not yet probed.
    async fn ensure_headers<H: HttpClient>(
        &mut self,
        http: &H,
        target: &str,
        trace: &mut DebugTrace,
    ) {
        if !self.cache.record(target).headers.is_unknown() {
            return;
        }

        trace.push("Fetching headers...");
        let probe = match Url::parse(target) {
            Ok(url) => match http.request(HttpRequest::head(url)).await {
                Ok(response) => Probe::Found(HeaderFields::from_header_map(&response.headers)),
                Err(e) => {
                    tracing::debug!(target, error = %e, "header fetch failed");
                    Probe::Absent
                }
            },
            Err(e) => {
                tracing::debug!(target, error = %e, "target URL not parseable");
                Probe::Absent
            }
        };

        self.cache.record(target).headers = probe;
    }

    /// Fetches the target's response body if not yet probed.
    ///
    /// The cached body is shared between the pingback and webmention
    /// pipelines, so whichever probes first saves the other a fetch.
    async fn ensure_body<H: HttpClient>(
        &mut self,
        http: &H,
        target: &str,
        trace: &mut DebugTrace,
    ) {
        if !self.cache.record(target).body.is_unknown() {
            return;
        }

        trace.push("Fetching body...");
        let probe = match Url::parse(target) {
            Ok(url) => match http.request(HttpRequest::get(url)).await {
                Ok(response) => {
                    Probe::Found(String::from_utf8_lossy(&response.body).into_owned())
                }
                Err(e) => {
                    tracing::debug!(target, error = %e, "body fetch failed");
                    Probe::Absent
                }
            },
            Err(e) => {
                tracing::debug!(target, error = %e, "target URL not parseable");
                Probe::Absent
            }
        };

        self.cache.record(target).body = probe;
    }
}

/// Corrects a relative endpoint: endpoints without an http/https scheme
/// get the target's `scheme://host` prefix prepended.
fn fix_relative_endpoint(endpoint: String, target: &str, trace: &mut DebugTrace) -> String {
    if has_http_scheme(&endpoint) {
        return endpoint;
    }

    trace.push("Relative endpoint found, fixing");
    let fixed = absolutize_endpoint(&endpoint, target);
    trace.push(&format!("Corrected endpoint: {fixed}"));
    fixed
}
