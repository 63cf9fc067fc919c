//! Tests for validated configuration.

use std::path::PathBuf;
use std::time::Duration;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["linkback"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod required_fields {
    use super::*;

    #[test]
    fn missing_source_returns_error() {
        let cli = cli(&[]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "source",
                ..
            })
        ));
    }

    #[test]
    fn source_from_cli() {
        let cli = cli(&["--source", "https://example.com/post"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.source_url.as_str(), "https://example.com/post");
    }

    #[test]
    fn source_from_toml() {
        let cli = cli(&[]);
        let toml = toml(
            r#"
            [source]
            url = "https://example.com/post"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();
        assert_eq!(config.source_url.as_str(), "https://example.com/post");
    }

    #[test]
    fn invalid_source_url_returns_error() {
        let cli = cli(&["--source", "not a url"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_source_overrides_toml() {
        let cli = cli(&["--source", "https://cli.example.com/post"]);
        let toml = toml(
            r#"
            [source]
            url = "https://toml.example.com/post"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();
        assert_eq!(config.source_url.as_str(), "https://cli.example.com/post");
    }

    #[test]
    fn cli_timeout_overrides_toml() {
        let cli = cli(&["--source", "https://example.com/post", "--timeout", "5"]);
        let toml = toml(
            r#"
            [http]
            timeout = 99
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn cli_body_file_overrides_toml() {
        let cli = cli(&[
            "--source",
            "https://example.com/post",
            "--body-file",
            "/tmp/cli.html",
        ]);
        let toml = toml(
            r#"
            [source]
            body_file = "/tmp/toml.html"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();
        assert_eq!(config.body_file, Some(PathBuf::from("/tmp/cli.html")));
    }

    #[test]
    fn dry_run_uses_or_semantics() {
        let cli = cli(&["--source", "https://example.com/post"]);
        let toml = toml(
            r#"
            [send]
            dry_run = true
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();
        assert!(config.dry_run, "TOML dry_run cannot be disabled by CLI");
    }
}

mod defaults {
    use super::*;

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        let cli = cli(&["--source", "https://example.com/post"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn optional_values_default_to_none() {
        let cli = cli(&["--source", "https://example.com/post"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(config.body_file.is_none());
        assert!(config.short_url.is_none());
        assert!(config.proxy.is_none());
        assert!(config.vouch.is_none());
        assert!(!config.dry_run);
        assert!(!config.debug);
        assert!(!config.verbose);
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = cli(&["--source", "https://example.com/post", "--timeout", "0"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn invalid_proxy_url_is_rejected() {
        let cli = cli(&[
            "--source",
            "https://example.com/post",
            "--proxy",
            "not a proxy",
        ]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidProxy { .. })));
    }

    #[test]
    fn invalid_vouch_url_is_rejected() {
        let cli = cli(&[
            "--source",
            "https://example.com/post",
            "--vouch",
            "not a vouch",
        ]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn invalid_short_url_is_rejected() {
        let cli = cli(&[
            "--source",
            "https://example.com/post",
            "--short-url",
            "nope",
        ]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn valid_urls_are_kept_verbatim() {
        let cli = cli(&[
            "--source",
            "https://example.com/post",
            "--short-url",
            "https://exm.pl/1",
            "--vouch",
            "https://example.com/vouch",
            "--proxy",
            "http://127.0.0.1:8080",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.short_url.as_deref(), Some("https://exm.pl/1"));
        assert_eq!(config.vouch.as_deref(), Some("https://example.com/vouch"));
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:8080"));
    }
}

mod file_generation {
    use super::*;

    #[test]
    fn writes_parseable_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkback.toml");

        write_default_config(&path).unwrap();

        let loaded = TomlConfig::load(&path).unwrap();
        assert!(loaded.source.url.is_none());
    }

    #[test]
    fn write_to_unwritable_path_is_an_error() {
        let result = write_default_config(std::path::Path::new("/nonexistent/dir/linkback.toml"));
        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_includes_key_settings() {
        let cli = cli(&["--source", "https://example.com/post", "--dry-run"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        let shown = config.to_string();
        assert!(shown.contains("https://example.com/post"));
        assert!(shown.contains("dry_run: true"));
        assert!(shown.contains("timeout: 30s"));
    }
}
