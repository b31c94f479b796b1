//! `tscat fetch <template>` – crawl one segment template into one file.

use anyhow::{Context, Result};
use tscat_core::abort;
use tscat_core::config::TscatConfig;
use tscat_core::crawl::CrawlJob;
use tscat_core::storage::destination_path;
use tscat_core::template::SegmentTemplate;

use super::{crawl_options, output_dir};
use crate::cli::progress::ConsoleProgress;
use crate::cli::prompt;
use crate::cli::FetchArgs;

pub async fn run_fetch(cfg: TscatConfig, args: FetchArgs) -> Result<()> {
    tokio::task::spawn_blocking(move || fetch_blocking(&cfg, args))
        .await
        .context("fetch task panicked")?
}

fn fetch_blocking(cfg: &TscatConfig, args: FetchArgs) -> Result<()> {
    let template = SegmentTemplate::parse(&args.template)?;
    let dir = output_dir(args.crawl.dir.clone())?;
    let destination = destination_path(&dir, &args.name, &cfg.container_extension);
    let policy = args.crawl.on_abort.unwrap_or(cfg.on_abort);

    let job = CrawlJob {
        template,
        destination: destination.clone(),
        resume: args.resume,
        options: crawl_options(cfg, &args.crawl),
        source_kind: args.source.unwrap_or(cfg.source),
        settings: cfg.source_settings(),
    };

    let result = {
        let mut progress = ConsoleProgress::new(&args.name);
        job.run(&mut progress)
    };

    match result {
        Ok(report) => {
            println!(
                "Finished downloading {} ({:.2} MB)",
                destination.display(),
                report.mib()
            );
            Ok(())
        }
        Err(e) => {
            if let Some(index) = e.failed_index() {
                println!(
                    "Failed to download file: {} (Failed segment: {})",
                    destination.display(),
                    index
                );
                let action = prompt::decide(policy, &destination, index)?;
                abort::apply(&destination, action)
                    .with_context(|| format!("remove partial file {}", destination.display()))?;
            }
            Err(e).with_context(|| format!("fetch {}", args.template))
        }
    }
}
