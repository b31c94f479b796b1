//! `tscat convert [pattern]` – batch transcode finished container files.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tscat_core::config::TscatConfig;
use tscat_core::transcode::{batch_convert, discover};

pub async fn run_convert(
    cfg: &TscatConfig,
    pattern: &str,
    dir: Option<&Path>,
    jobs: Option<usize>,
) -> Result<()> {
    let pattern = match dir {
        Some(d) => d.join(pattern).to_string_lossy().into_owned(),
        None => pattern.to_string(),
    };
    let inputs = discover(&pattern)?;
    if inputs.is_empty() {
        println!("No files match {pattern}");
        return Ok(());
    }

    let mut settings = cfg.transcode_settings();
    if jobs.is_some() {
        settings.max_parallel = jobs;
    }

    println!("Converting {} files", inputs.len());
    let summary = batch_convert(&settings, inputs, |remaining| {
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\rFiles remaining: {remaining}  ");
        let _ = err.flush();
    })
    .await;
    eprintln!();

    println!(
        "Converted {} of {} files ({} failed)",
        summary.converted, summary.total, summary.failed
    );
    Ok(())
}
