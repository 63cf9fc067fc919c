//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["linkback", "--source", "https://example.com/post"]);

        assert_eq!(cli.source.as_deref(), Some("https://example.com/post"));
        assert!(cli.body_file.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.debug);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_source_options() {
        let cli = Cli::parse_from_iter([
            "linkback",
            "--source",
            "https://example.com/post",
            "--body-file",
            "/tmp/post.html",
            "--short-url",
            "https://exm.pl/1",
        ]);

        assert_eq!(cli.body_file, Some(PathBuf::from("/tmp/post.html")));
        assert_eq!(cli.short_url.as_deref(), Some("https://exm.pl/1"));
    }

    #[test]
    fn parse_transport_options() {
        let cli = Cli::parse_from_iter([
            "linkback",
            "--source",
            "https://example.com/post",
            "--proxy",
            "http://127.0.0.1:8080",
            "--timeout",
            "10",
        ]);

        assert_eq!(cli.proxy.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(cli.timeout, Some(10));
    }

    #[test]
    fn parse_send_options() {
        let cli = Cli::parse_from_iter([
            "linkback",
            "--source",
            "https://example.com/post",
            "--vouch",
            "https://example.com/vouch",
            "--dry-run",
            "--debug",
            "--verbose",
        ]);

        assert_eq!(cli.vouch.as_deref(), Some("https://example.com/vouch"));
        assert!(cli.dry_run);
        assert!(cli.debug);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from_iter(["linkback", "-c", "/etc/linkback.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/linkback.toml")));
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn init_with_default_output() {
        let cli = Cli::parse_from_iter(["linkback", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("linkback.toml"));
            }
            other => panic!("expected init command, got {other:?}"),
        }
    }

    #[test]
    fn init_with_custom_output() {
        let cli = Cli::parse_from_iter(["linkback", "init", "--output", "/tmp/custom.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/tmp/custom.toml"));
            }
            other => panic!("expected init command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_is_run_mode() {
        let cli = Cli::parse_from_iter(["linkback", "--source", "https://example.com/"]);
        assert!(!cli.is_init());
    }
}
