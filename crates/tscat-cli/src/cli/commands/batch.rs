//! `tscat batch <manifest>` – one crawl per manifest entry.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tscat_core::abort::AbortAction;
use tscat_core::config::TscatConfig;
use tscat_core::crawl::CrawlError;
use tscat_core::manifest::{load_manifest, ManifestEntry, ManifestRunner};

use super::{crawl_options, output_dir};
use crate::cli::progress::ConsoleProgress;
use crate::cli::prompt;
use crate::cli::CrawlArgs;

pub async fn run_batch(cfg: TscatConfig, manifest: PathBuf, args: CrawlArgs) -> Result<()> {
    tokio::task::spawn_blocking(move || batch_blocking(&cfg, &manifest, args))
        .await
        .context("batch task panicked")?
}

fn batch_blocking(cfg: &TscatConfig, manifest: &Path, args: CrawlArgs) -> Result<()> {
    let entries = load_manifest(manifest)?;
    println!("Downloading {} files", entries.len());

    let policy = args.on_abort.unwrap_or(cfg.on_abort);
    let runner = ManifestRunner {
        dir: output_dir(args.dir.clone())?,
        extension: cfg.container_extension.clone(),
        options: crawl_options(cfg, &args),
        source_kind: cfg.source,
        settings: cfg.source_settings(),
    };

    let outcomes = runner.run(
        &entries,
        |entry: &ManifestEntry| ConsoleProgress::new(&entry.filename),
        |_entry: &ManifestEntry, destination: &Path, err: &CrawlError| {
            let index = err.failed_index().unwrap_or_default();
            println!(
                "Failed to download file: {} (Failed segment: {})",
                destination.display(),
                index
            );
            prompt::decide(policy, destination, index).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "no answer for partial file, keeping it");
                AbortAction::Keep
            })
        },
    );

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => println!(
                "Finished downloading {} ({:.2} MB)",
                outcome.destination.display(),
                report.mib()
            ),
            Err(e) => {
                failed += 1;
                if e.failed_index().is_none() {
                    eprintln!("{}: {e}", outcome.entry.url);
                }
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} downloads failed", outcomes.len());
    }
    Ok(())
}
