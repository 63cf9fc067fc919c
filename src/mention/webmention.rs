//! Form-encoded webmention payload construction and delivery.

use url::Url;
use url::form_urlencoded;

use crate::http::{HttpClient, HttpRequest};

/// Outcome of a single webmention delivery attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// True if the endpoint accepted the mention (HTTP 200 or 202).
    pub accepted: bool,
    /// URL returned by the endpoint, e.g. a syndicated copy it created.
    pub returned_url: Option<String>,
}

/// Builds the form body: `source`, `target`, and `vouch` only when a
/// vouch token is supplied.
#[must_use]
pub fn encode_form(source: &str, target: &str, vouch: Option<&str>) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    form.append_pair("source", source);
    form.append_pair("target", target);
    if let Some(vouch) = vouch {
        form.append_pair("vouch", vouch);
    }
    form.finish()
}

/// Returns true if the target is a URL-shortener-sensitive receiver
/// that should be sent the short source URL instead of the full one.
///
/// The match is `brid.gy` or `brid-gy` appearing within the first 15
/// characters of the target URL; the position bound keeps the pattern
/// from matching deep in a path. Receivers beyond Bridgy are not
/// recognized.
#[must_use]
pub fn prefers_short_source(target: &str) -> bool {
    ["brid.gy", "brid-gy"]
        .iter()
        .any(|needle| target.find(needle).is_some_and(|pos| pos < 15))
}

/// Sends a webmention to the given endpoint and reports the outcome.
///
/// The request is posted as `application/x-www-form-urlencoded` with
/// `Accept: application/json`. Accepted means HTTP 200 or 202. If the
/// response body is JSON with a `url` field, that URL is reported back
/// in the [`Delivery`]. Transport failures and unparseable endpoints
/// report as not accepted.
pub async fn send<H: HttpClient>(
    http: &H,
    endpoint: &str,
    source: &str,
    target: &str,
    vouch: Option<&str>,
) -> Delivery {
    let Ok(url) = Url::parse(endpoint) else {
        tracing::debug!(endpoint, "webmention endpoint not parseable");
        return Delivery::default();
    };

    let request = HttpRequest::post(url)
        .with_header(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/x-www-form-urlencoded"),
        )
        .with_header(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/json"),
        )
        .with_body(encode_form(source, target, vouch).into_bytes());

    let response = match http.request(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(endpoint, error = %e, "webmention send failed");
            return Delivery::default();
        }
    };

    let accepted = matches!(response.status.as_u16(), 200 | 202);
    let returned_url = response
        .body_text()
        .and_then(|text| serde_json::from_str::<serde_json::Value>(text).ok())
        .as_ref()
        .and_then(|json| json.get("url"))
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string);

    Delivery {
        accepted,
        returned_url,
    }
}
