//! CLI for tscat.

mod commands;
mod progress;
mod prompt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tscat_core::abort::AbortPolicy;
use tscat_core::config;
use tscat_core::source::SourceKind;

use commands::{run_batch, run_convert, run_fetch};

/// Top-level CLI for tscat.
#[derive(Debug, Parser)]
#[command(name = "tscat")]
#[command(about = "tscat: crawl numbered media segments into one file", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tscat/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides shared by the crawling commands.
#[derive(Debug, Clone, Args)]
pub struct CrawlArgs {
    /// Output directory (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// First segment index.
    #[arg(long, value_name = "N")]
    pub start: Option<u64>,
    /// Zero-padded width of the segment index.
    #[arg(long, value_name = "N")]
    pub digits: Option<usize>,
    /// What to do with a partial file after a failed segment: keep, discard or prompt.
    #[arg(long, value_name = "POLICY")]
    pub on_abort: Option<AbortPolicy>,
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Segment URL or path containing an `[i]` index placeholder.
    pub template: String,
    /// Output file name; the container extension is appended when missing.
    #[arg(long, short, default_value = "stream")]
    pub name: String,
    /// Append to an existing partial file instead of truncating it.
    #[arg(long)]
    pub resume: bool,
    /// Segment source: auto, remote or local.
    #[arg(long, value_name = "KIND")]
    pub source: Option<SourceKind>,
    #[command(flatten)]
    pub crawl: CrawlArgs,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Crawl one segment template into a single container file.
    Fetch(FetchArgs),

    /// Crawl every entry of a JSON manifest of {"url", "filename"} objects.
    Batch {
        /// Path to the manifest file.
        manifest: PathBuf,
        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Convert finished container files with the external transcoder.
    Convert {
        /// File-name wildcard of the inputs.
        #[arg(default_value = "*.ts")]
        pattern: String,
        /// Directory to search (default: current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Conversions to run at once (default: config, then CPU count).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(cfg, args).await?,
            CliCommand::Batch { manifest, crawl } => run_batch(cfg, manifest, crawl).await?,
            CliCommand::Convert { pattern, dir, jobs } => {
                run_convert(&cfg, &pattern, dir.as_deref(), jobs).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
