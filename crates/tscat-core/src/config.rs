use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::abort::AbortPolicy;
use crate::crawl::CrawlOptions;
use crate::retry::RetryPolicy;
use crate::source::{SourceKind, SourceSettings, TerminalPolicy};
use crate::transcode::TranscodeSettings;

/// HTTP fetch parameters for the remote segment source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total per-segment request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Response statuses that mean "no more segments" rather than an error.
    pub terminal_statuses: Vec<u32>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 10,
            terminal_statuses: TerminalPolicy::default().statuses().to_vec(),
        }
    }
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per segment (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        }
    }
}

/// External transcoder settings (`[transcode]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    pub program: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub output_extension: String,
    /// Upper bound on concurrent conversions (None = available parallelism).
    pub max_parallel: Option<usize>,
}

impl Default for TranscodeConfig {
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

/// Global configuration loaded from `~/.config/tscat/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TscatConfig {
    /// First segment index of a fresh crawl.
    pub start: u64,
    /// Zero-padded width of the index substituted into the template.
    pub digits: usize,
    /// Number of buffered segments that triggers a flush to disk.
    pub flush_threshold: usize,
    /// Container extension appended to destination names that lack it.
    pub container_extension: String,
    /// What to do with a partial destination after an aborted crawl.
    pub on_abort: AbortPolicy,
    /// How a template is mapped to a segment source.
    pub source: SourceKind,
    pub http: HttpConfig,
    /// Optional retry policy; if missing, each segment is attempted once.
    pub retry: Option<RetryConfig>,
    pub transcode: TranscodeConfig,
}

impl Default for TscatConfig {
    fn default() -> Self {
        Self {
            start: 1,
            digits: 1,
            flush_threshold: crate::storage::DEFAULT_FLUSH_THRESHOLD,
            container_extension: crate::storage::DEFAULT_EXTENSION.to_string(),
            on_abort: AbortPolicy::default(),
            source: SourceKind::default(),
            http: HttpConfig::default(),
            retry: None,
            transcode: TranscodeConfig::default(),
        }
    }
}

impl TscatConfig {
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            start: self.start,
            digits: self.digits,
            flush_threshold: self.flush_threshold,
        }
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            timeout: Duration::from_secs(self.http.timeout_secs),
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            terminal: TerminalPolicy::new(self.http.terminal_statuses.clone()),
            retry: self
                .retry
                .as_ref()
                .map(RetryPolicy::from)
                .unwrap_or_else(RetryPolicy::single_attempt),
        }
    }

    pub fn transcode_settings(&self) -> TranscodeSettings {
        TranscodeSettings {
            program: self.transcode.program.clone(),
            video_codec: self.transcode.video_codec.clone(),
            audio_codec: self.transcode.audio_codec.clone(),
            output_extension: self.transcode.output_extension.clone(),
            max_parallel: self.transcode.max_parallel,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tscat")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TscatConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<TscatConfig> {
    if !path.exists() {
        let default_cfg = TscatConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: TscatConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
