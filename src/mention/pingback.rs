//! XML-RPC pingback payload construction and response interpretation.
//!
//! A pingback is an XML-RPC call to `pingback.ping(source, target)`
//! posted as `application/xml`. A successful reply decodes to a plain
//! string scalar; a fault reply decodes to a structured value and counts
//! as a rejection, as does an empty or undecodable response.

use url::Url;

use crate::http::{HttpClient, HttpRequest};

/// Encodes a `pingback.ping` method call with the given parameters.
///
/// Both parameters are XML-escaped.
#[must_use]
pub fn encode_ping(source: &str, target: &str) -> String {
    let mut xml = String::from(r#"<?xml version="1.0"?>"#);
    xml.push_str("<methodCall>");
    xml.push_str("<methodName>pingback.ping</methodName>");
    xml.push_str("<params>");
    for param in [source, target] {
        xml.push_str("<param><value><string>");
        xml.push_str(&xml_escape(param));
        xml.push_str("</string></value></param>");
    }
    xml.push_str("</params></methodCall>");
    xml
}

/// Interprets an XML-RPC pingback response body.
///
/// Accepted means the reply is a method response carrying a scalar
/// value. Fault replies and structured (struct/array) payloads are
/// rejections; so is anything empty or not recognizably XML-RPC.
#[must_use]
pub fn response_accepted(body: &str) -> bool {
    let body = body.trim();
    if body.is_empty() || !body.contains("<methodResponse") {
        return false;
    }

    !(body.contains("<fault>") || body.contains("<struct>") || body.contains("<array>"))
}

/// Sends a pingback for `source` linking to `target` to the given
/// endpoint and reports whether the endpoint accepted it.
///
/// Transport failures and unparseable endpoints report as not accepted;
/// they are never surfaced as errors.
pub async fn send<H: HttpClient>(http: &H, endpoint: &str, source: &str, target: &str) -> bool {
    let Ok(url) = Url::parse(endpoint) else {
        tracing::debug!(endpoint, "pingback endpoint not parseable");
        return false;
    };

    let request = HttpRequest::post(url)
        .with_header(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/xml"),
        )
        .with_body(encode_ping(source, target).into_bytes());

    match http.request(request).await {
        Ok(response) => response_accepted(response.body_text().unwrap_or("")),
        Err(e) => {
            tracing::debug!(endpoint, error = %e, "pingback send failed");
            false
        }
    }
}

/// Escapes the XML special characters in a parameter value.
fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
