//! Tests for the batch and convert subcommands.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;
use tscat_core::abort::AbortPolicy;

#[test]
fn cli_parse_batch() {
    match parse(&["tscat", "batch", "lectures.json"]) {
        CliCommand::Batch { manifest, crawl } => {
            assert_eq!(manifest, Path::new("lectures.json"));
            assert!(crawl.dir.is_none());
            assert!(crawl.on_abort.is_none());
        }
        _ => panic!("expected Batch"),
    }
}

#[test]
fn cli_parse_batch_overrides() {
    match parse(&[
        "tscat",
        "batch",
        "lectures.json",
        "--dir",
        "/data",
        "--digits",
        "4",
        "--on-abort",
        "discard",
    ]) {
        CliCommand::Batch { crawl, .. } => {
            assert_eq!(crawl.dir.as_deref(), Some(Path::new("/data")));
            assert_eq!(crawl.digits, Some(4));
            assert_eq!(crawl.on_abort, Some(AbortPolicy::Discard));
        }
        _ => panic!("expected Batch with overrides"),
    }
}

#[test]
fn cli_parse_convert_defaults() {
    match parse(&["tscat", "convert"]) {
        CliCommand::Convert { pattern, dir, jobs } => {
            assert_eq!(pattern, "*.ts");
            assert!(dir.is_none());
            assert!(jobs.is_none());
        }
        _ => panic!("expected Convert"),
    }
}

#[test]
fn cli_parse_convert_pattern_and_jobs() {
    match parse(&["tscat", "convert", "lecture-*.ts", "--dir", "/data", "--jobs", "2"]) {
        CliCommand::Convert { pattern, dir, jobs } => {
            assert_eq!(pattern, "lecture-*.ts");
            assert_eq!(dir.as_deref(), Some(Path::new("/data")));
            assert_eq!(jobs, Some(2));
        }
        _ => panic!("expected Convert with --jobs"),
    }
}
