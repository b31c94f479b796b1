//! Tests for the fetch subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;
use tscat_core::abort::AbortPolicy;
use tscat_core::source::SourceKind;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["tscat", "fetch", "https://cdn.example/seg-[i].ts"]) {
        CliCommand::Fetch(args) => {
            assert_eq!(args.template, "https://cdn.example/seg-[i].ts");
            assert_eq!(args.name, "stream");
            assert!(!args.resume);
            assert!(args.source.is_none());
            assert!(args.crawl.dir.is_none());
            assert!(args.crawl.start.is_none());
            assert!(args.crawl.digits.is_none());
            assert!(args.crawl.on_abort.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_resume_flags() {
    match parse(&[
        "tscat",
        "fetch",
        "https://cdn.example/seg-[i].ts",
        "--name",
        "lecture",
        "--dir",
        "/tmp/out",
        "--start",
        "42",
        "--digits",
        "3",
        "--resume",
        "--on-abort",
        "keep",
    ]) {
        CliCommand::Fetch(args) => {
            assert_eq!(args.name, "lecture");
            assert_eq!(args.crawl.dir.as_deref(), Some(Path::new("/tmp/out")));
            assert_eq!(args.crawl.start, Some(42));
            assert_eq!(args.crawl.digits, Some(3));
            assert!(args.resume);
            assert_eq!(args.crawl.on_abort, Some(AbortPolicy::Keep));
        }
        _ => panic!("expected Fetch with overrides"),
    }
}

#[test]
fn cli_parse_fetch_source_kind() {
    match parse(&["tscat", "fetch", "/srv/seg[i].ts", "--source", "local"]) {
        CliCommand::Fetch(args) => assert_eq!(args.source, Some(SourceKind::Local)),
        _ => panic!("expected Fetch with --source"),
    }
}

#[test]
fn cli_parse_fetch_rejects_unknown_policy() {
    assert!(Cli::try_parse_from(["tscat", "fetch", "x[i]", "--on-abort", "maybe"]).is_err());
    assert!(Cli::try_parse_from(["tscat", "fetch", "x[i]", "--source", "ftp"]).is_err());
}

#[test]
fn cli_parse_fetch_requires_template() {
    assert!(Cli::try_parse_from(["tscat", "fetch"]).is_err());
}

#[test]
fn cli_parse_global_config() {
    let cli = Cli::try_parse_from(["tscat", "fetch", "x[i]", "--config", "/etc/tscat.toml"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/tscat.toml")));
}
