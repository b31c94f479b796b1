//! Batch transcoding of finished container files through an external tool.
//!
//! One task per input file, gated by a worker limit, joined before returning.
//! A failed conversion is logged and counted but never returned as an error.

mod command;
mod discover;

pub use command::{convert_one, output_path, transcode_args};
pub use discover::{discover, wildcard_regex};

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// External tool invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeSettings {
    pub program: String,
    pub video_codec: String,
    pub audio_codec: String,
    /// Extension of the converted file (replaces the input extension).
    pub output_extension: String,
    /// Concurrent conversions (None = available parallelism).
    pub max_parallel: Option<usize>,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            output_extension: "mp4".to_string(),
            max_parallel: None,
        }
    }
}

impl TranscodeSettings {
    /// Number of conversions allowed in flight for `inputs` files; always at least 1.
    pub fn worker_limit(&self, inputs: usize) -> usize {
        let limit = self.max_parallel.filter(|n| *n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        });
        limit.min(inputs).max(1)
    }
}

/// Counts reported once every conversion task has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeSummary {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
}

/// Converts every input concurrently and waits for all of them.
/// `on_remaining` is called with the number of unfinished tasks after each one completes.
pub async fn batch_convert<F>(
    settings: &TranscodeSettings,
    inputs: Vec<PathBuf>,
    mut on_remaining: F,
) -> TranscodeSummary
where
    F: FnMut(usize),
{
    let total = inputs.len();
    let limit = settings.worker_limit(total);
    tracing::info!(files = total, workers = limit, program = %settings.program, "batch transcode started");

    let permits = Arc::new(Semaphore::new(limit));
    let settings = Arc::new(settings.clone());
    let mut tasks = JoinSet::new();
    for input in inputs {
        let permits = Arc::clone(&permits);
        let settings = Arc::clone(&settings);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            let result = convert_one(&settings, &input).await;
            (input, result)
        });
    }

    let mut summary = TranscodeSummary {
        total,
        ..TranscodeSummary::default()
    };
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((input, Ok(output))) => {
                summary.converted += 1;
                tracing::info!(input = %input.display(), output = %output.display(), "converted");
            }
            Ok((input, Err(e))) => {
                summary.failed += 1;
                tracing::warn!(input = %input.display(), error = %format!("{e:#}"), "conversion failed");
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(error = %e, "conversion task panicked");
            }
        }
        on_remaining(tasks.len());
    }

    tracing::info!(
        converted = summary.converted,
        failed = summary.failed,
        "batch transcode finished"
    );
    summary
}
