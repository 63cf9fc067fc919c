//! HTTP header field parsing and case canonicalization.
//!
//! Remote servers disagree on header casing (`X-Pingback`, `x-pingback`,
//! `X-PINGBACK`). [`HeaderFields`] normalizes names to a canonical
//! capitalized-word form so lookups are insensitive to the server's
//! convention, and keeps every occurrence of repeated fields in order.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// A `Name: Value` field line. Lines that do not match are skipped.
static FIELD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+): (.+)$").expect("valid header field pattern"));

/// Line continuations per RFC 2231 style folding: CRLF followed by
/// whitespace joins onto the previous line.
static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n[\t ]+").expect("valid continuation pattern"));

/// Case-canonicalized HTTP header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    fields: HashMap<String, Vec<String>>,
}

impl HeaderFields {
    /// Parses a raw HTTP response header blob.
    ///
    /// The blob is a status line followed by CRLF-separated fields.
    /// Folded continuation lines are unfolded first; the status line and
    /// any unparseable lines are skipped silently.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let unfolded = CONTINUATION.replace_all(raw, " ");
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();

        for line in unfolded.split("\r\n") {
            if let Some(caps) = FIELD_LINE.captures(line) {
                let name = canonical_name(&caps[1]);
                fields.entry(name).or_default().push(caps[2].trim().to_string());
            }
        }

        Self { fields }
    }

    /// Builds header fields from an already-parsed header map.
    ///
    /// Values that are not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_header_map(map: &http::HeaderMap) -> Self {
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();

        for (name, value) in map {
            if let Ok(value) = value.to_str() {
                fields
                    .entry(canonical_name(name.as_str()))
                    .or_default()
                    .push(value.to_string());
            }
        }

        Self { fields }
    }

    /// Returns the first value for a header, if present.
    ///
    /// The lookup name is canonicalized, so any casing works.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&canonical_name(name))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all values for a header, in order of appearance.
    #[must_use]
    pub fn all(&self, name: &str) -> &[String] {
        self.fields
            .get(&canonical_name(name))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns all values for a header joined with `", "`.
    ///
    /// The Link header may appear multiple times; joining the values
    /// restores the equivalent single-header form for relation matching.
    #[must_use]
    pub fn joined(&self, name: &str) -> Option<String> {
        self.fields
            .get(&canonical_name(name))
            .map(|values| values.join(", "))
    }

    /// Returns true if the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&canonical_name(name))
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no headers were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Canonicalizes a header name: lowercase, then the first letter of each
/// word (delimited by `-`, space, or tab) uppercased. `x-pingback`
/// becomes `X-Pingback`.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut boundary = true;

    for ch in lower.chars() {
        if boundary {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        boundary = matches!(ch, '-' | ' ' | '\t');
    }

    out
}
