//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Source document URL (required)
    pub source_url: Url,

    /// Local file to read the source body from instead of fetching it
    pub body_file: Option<PathBuf>,

    /// Short URL sent as the webmention source to shortener-sensitive
    /// receivers
    pub short_url: Option<String>,

    /// HTTP/HTTPS proxy URL for all outgoing requests
    pub proxy: Option<String>,

    /// Request timeout for every outgoing request
    pub timeout: Duration,

    /// Vouch URL included with every webmention
    pub vouch: Option<String>,

    /// Dry-run mode (discover and report endpoints without sending)
    pub dry_run: bool,

    /// Collect and print a discovery and delivery trace
    pub debug: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body_file_str = self
            .body_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ source: {}, body_file: {}, short_url: {}, proxy: {}, timeout: {}s, \
             vouch: {}, dry_run: {} }}",
            self.source_url,
            body_file_str,
            self.short_url.as_deref().unwrap_or("none"),
            self.proxy.as_deref().unwrap_or("none"),
            self.timeout.as_secs(),
            self.vouch.as_deref().unwrap_or("none"),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source URL is missing
    /// - Any URL value does not parse
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        // Merge and validate source URL (required)
        let source_url = Self::resolve_source_url(cli, toml)?;

        // Merge body file path (CLI takes precedence over TOML)
        let body_file = Self::resolve_body_file(cli, toml);

        // Merge and validate optional URLs
        let short_url = Self::resolve_optional_url("short_url", cli.short_url.as_deref(), || {
            toml.and_then(|t| t.source.short_url.as_deref())
        })?;
        let vouch = Self::resolve_optional_url("vouch", cli.vouch.as_deref(), || {
            toml.and_then(|t| t.send.vouch.as_deref())
        })?;

        // Merge and validate proxy
        let proxy = Self::resolve_proxy(cli, toml)?;

        // Merge timeout (CLI default: 30s)
        let timeout = Self::resolve_timeout(cli, toml)?;

        // Merge dry_run (CLI wins if true)
        let dry_run = cli.dry_run || toml.is_some_and(|t| t.send.dry_run);

        Ok(Self {
            source_url,
            body_file,
            short_url,
            proxy,
            timeout,
            vouch,
            dry_run,
            debug: cli.debug,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    /// Otherwise the default location is loaded if it exists; a missing
    /// default file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            match default_config_path() {
                Some(path) if path.exists() => Some(TomlConfig::load(&path)?),
                _ => None,
            }
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_source_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .source
            .as_deref()
            .or_else(|| toml.and_then(|t| t.source.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SOURCE,
                    "Use --source or set source.url in config file",
                )
            })?;

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_body_file(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        // CLI takes precedence
        let path = cli.body_file.clone().or_else(|| {
            toml.and_then(|t| t.source.body_file.as_deref().map(PathBuf::from))
        })?;

        Some(expand_tilde(&path))
    }

    fn resolve_optional_url<'a>(
        name: &'static str,
        cli_value: Option<&'a str>,
        toml_value: impl FnOnce() -> Option<&'a str>,
    ) -> Result<Option<String>, ConfigError> {
        // Priority: CLI explicit > TOML
        let Some(url_str) = cli_value.or_else(toml_value) else {
            return Ok(None);
        };

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: format!("{name}: {url_str}"),
            reason: e.to_string(),
        })?;

        Ok(Some(url_str.to_string()))
    }

    fn resolve_proxy(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<String>, ConfigError> {
        let Some(proxy_str) = cli
            .proxy
            .as_deref()
            .or_else(|| toml.and_then(|t| t.http.proxy.as_deref()))
        else {
            return Ok(None);
        };

        Url::parse(proxy_str).map_err(|e| ConfigError::InvalidProxy {
            url: proxy_str.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(proxy_str.to_string()))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.http.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Returns the default config file location:
/// `<config dir>/linkback/linkback.toml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::CONFIG_DIR).join(defaults::CONFIG_FILE))
}

/// Expands a leading `~` or `~/` to the user's home directory. Paths
/// without a tilde prefix pass through untouched.
fn expand_tilde(path: &Path) -> PathBuf {
    let Some(rest) = path.to_str().and_then(|s| s.strip_prefix('~')) else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(
        || path.to_path_buf(),
        |home| {
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            if rest.is_empty() { home } else { home.join(rest) }
        },
    )
}
