//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Name of the default configuration file.
pub const CONFIG_FILE: &str = "linkback.toml";

/// Directory under the platform config dir where the default
/// configuration file lives.
pub const CONFIG_DIR: &str = "linkback";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
