use super::{parse, Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_resolve() {
    match parse(&["rmf", "resolve", "https://www.reddit.com/r/videos/comments/abc123/t/"]) {
        CliCommand::Resolve { url } => {
            assert_eq!(url, "https://www.reddit.com/r/videos/comments/abc123/t/")
        }
        other => panic!("expected Resolve, got {:?}", other),
    }
}

#[test]
fn cli_parse_fetch_default_media_dir() {
    match parse(&["rmf", "fetch", "https://redd.it/abc123"]) {
        CliCommand::Fetch { url, media_dir } => {
            assert_eq!(url, "https://redd.it/abc123");
            assert!(media_dir.is_none());
        }
        other => panic!("expected Fetch, got {:?}", other),
    }
}

#[test]
fn cli_parse_fetch_with_media_dir() {
    match parse(&["rmf", "fetch", "https://redd.it/abc123", "--media-dir", "/srv/media"]) {
        CliCommand::Fetch { media_dir, .. } => {
            assert_eq!(media_dir.as_deref(), Some(Path::new("/srv/media")))
        }
        other => panic!("expected Fetch, got {:?}", other),
    }
}

#[test]
fn cli_parse_config() {
    assert!(matches!(parse(&["rmf", "config"]), CliCommand::Config));
}

#[test]
fn cli_parse_global_log_filter() {
    let cli = Cli::try_parse_from(["rmf", "resolve", "--log-filter", "debug", "https://redd.it/x"]).unwrap();
    assert_eq!(cli.log_filter.as_deref(), Some("debug"));
}

#[test]
fn cli_requires_url() {
    assert!(Cli::try_parse_from(["rmf", "resolve"]).is_err());
    assert!(Cli::try_parse_from(["rmf", "fetch"]).is_err());
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["rmf", "add", "https://example.com/file.iso"]).is_err());
}
