//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Source document configuration section
    #[serde(default)]
    pub source: SourceSection,

    /// HTTP transport configuration section
    #[serde(default)]
    pub http: HttpSection,

    /// Sending behavior configuration section
    #[serde(default)]
    pub send: SendSection,
}

/// Source document configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// Source document URL
    pub url: Option<String>,

    /// Local file to read the source body from instead of fetching it
    pub body_file: Option<String>,

    /// Short URL sent as the webmention source to shortener-sensitive
    /// receivers
    pub short_url: Option<String>,
}

/// HTTP transport configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// HTTP/HTTPS proxy URL for all outgoing requests
    pub proxy: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Sending behavior configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendSection {
    /// Vouch URL included with every webmention
    pub vouch: Option<String>,

    /// Discover endpoints and report them without sending anything
    #[serde(default)]
    pub dry_run: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# linkback Configuration File

[source]
# Source document URL (required)
# url = "https://example.com/my-post"

# Read the source body from a local file instead of fetching it
# body_file = "~/posts/my-post.html"

# Short URL sent as the webmention source to shortener-sensitive
# receivers (e.g. Bridgy)
# short_url = "https://exm.pl/1"

[http]
# HTTP/HTTPS proxy URL for all outgoing requests
# proxy = "http://127.0.0.1:8080"

# Request timeout in seconds (default: 30)
# timeout = 30

[send]
# Vouch URL included with every webmention
# vouch = "https://example.com/linked-from-target"

# Discover endpoints and report them without sending anything
# dry_run = false
"#
    .to_string()
}
