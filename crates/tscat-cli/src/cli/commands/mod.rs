//! CLI command handlers, one file per subcommand.

mod batch;
mod convert;
mod fetch;

pub use batch::run_batch;
pub use convert::run_convert;
pub use fetch::run_fetch;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tscat_core::config::TscatConfig;
use tscat_core::crawl::CrawlOptions;

use super::CrawlArgs;

/// Config crawl options with the per-invocation flag overrides applied.
fn crawl_options(cfg: &TscatConfig, args: &CrawlArgs) -> CrawlOptions {
    let mut options = cfg.crawl_options();
    if let Some(start) = args.start {
        options.start = start;
    }
    if let Some(digits) = args.digits {
        options.digits = digits;
    }
    options
}

fn output_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => std::env::current_dir().context("current directory"),
    }
}
