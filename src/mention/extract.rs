//! Outbound link extraction from HTML documents.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Anchor href values with an http/https scheme. The quote character is
/// matched loosely (any single character) so both quoting styles work.
static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]+href=.(https?://[^'"]+)"#).expect("valid anchor href pattern")
});

/// Extracts the distinct absolute external links from an HTML document.
///
/// Matching is case-insensitive on the tag and attribute names and is
/// restricted to `http://` and `https://` URLs. Duplicates are dropped,
/// preserving the order of first appearance. Malformed markup simply
/// yields fewer or no matches; this never fails.
#[must_use]
pub fn extract_links(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for caps in ANCHOR_HREF.captures_iter(html) {
        let link = &caps[1];
        if seen.insert(link.to_string()) {
            links.push(link.to_string());
        }
    }

    links
}
