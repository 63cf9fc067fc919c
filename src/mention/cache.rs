//! Per-target discovery memoization.
//!
//! Each fact about a target (its headers, its body, its pingback and
//! webmention endpoints) is probed over the network at most once per
//! resolver lifetime. A negative probe is cached and never retried; this
//! is the caching contract, not an optimization.

use std::collections::HashMap;

use super::headers::HeaderFields;

/// A three-state memoization cell: not yet probed, probed and negative,
/// or probed and positive with a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// The fact has not been probed yet.
    Unknown,
    /// Probed, and the fact is absent. Terminal.
    Absent,
    /// Probed, and the fact was found. Terminal.
    Found(T),
}

impl<T> Probe<T> {
    /// Returns true if the fact has not been probed yet.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true if the fact was probed and found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the probed value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Unknown | Self::Absent => None,
        }
    }
}

impl<T> Default for Probe<T> {
    fn default() -> Self {
        Self::Unknown
    }
}

impl<T> From<Option<T>> for Probe<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Found)
    }
}

/// Everything discovered about a single target URL.
///
/// The `headers` and `body` cells are shared between the pingback and
/// webmention discovery pipelines; the endpoint cells double as the
/// supported/unsupported verdict for their protocol.
#[derive(Debug, Clone, Default)]
pub struct TargetRecord {
    /// Response headers from the HEAD probe.
    pub headers: Probe<HeaderFields>,
    /// Response body from the GET probe.
    pub body: Probe<String>,
    /// Discovered pingback endpoint URL.
    pub pingback: Probe<String>,
    /// Discovered webmention endpoint URL (absolutized).
    pub webmention: Probe<String>,
}

/// Discovery state for all targets seen by a resolver instance.
///
/// In-memory only; nothing is persisted across process lifetimes.
#[derive(Debug, Default)]
pub struct DiscoveryCache {
    targets: HashMap<String, TargetRecord>,
}

impl DiscoveryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for a target, creating an empty one if needed.
    pub fn record(&mut self, target: &str) -> &mut TargetRecord {
        self.targets.entry(target.to_string()).or_default()
    }

    /// Returns the record for a target, if it was ever probed.
    #[must_use]
    pub fn get(&self, target: &str) -> Option<&TargetRecord> {
        self.targets.get(target)
    }

    /// Returns the number of targets with a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if no target has been probed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
