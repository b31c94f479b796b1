//! Segment sources: turn a resolved address into segment bytes or a terminal signal.
//!
//! Two variants share one contract. The remote source issues an HTTP GET via
//! libcurl; the local source reads a file. Absence of the next segment is the
//! protocol's end-of-stream marker and is reported as [`Fetch::Terminal`], while
//! genuine transport failures surface as [`FetchError`] and abort the crawl.

mod local;
mod remote;
mod terminal;

pub use local::LocalSource;
pub use remote::RemoteSource;
pub use terminal::{StatusClass, TerminalPolicy};

use crate::retry::RetryPolicy;
use crate::template::SegmentTemplate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Outcome of a successful fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    /// Payload for the requested index (may be empty).
    Segment(Vec<u8>),
    /// No segment at this index: the stream has ended.
    Terminal,
}

/// Transient failure of a single fetch. Fatal to the current crawl.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response status was neither success nor a terminal status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Error building a source for a template.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("invalid segment URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
    #[error("http client setup: {0}")]
    Client(#[from] curl::Error),
}

/// Fetches the bytes behind one resolved segment address.
pub trait SegmentSource {
    fn fetch(&mut self, address: &str) -> Result<Fetch, FetchError>;
}

impl<S: SegmentSource + ?Sized> SegmentSource for Box<S> {
    fn fetch(&mut self, address: &str) -> Result<Fetch, FetchError> {
        (**self).fetch(address)
    }
}

/// Which source variant a template maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `http`/`https` templates are remote, everything else is a local path.
    #[default]
    Auto,
    Remote,
    Local,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SourceKind::Auto),
            "remote" => Ok(SourceKind::Remote),
            "local" => Ok(SourceKind::Local),
            other => Err(format!("unknown source kind {other:?} (auto, remote, local)")),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceKind::Auto => "auto",
            SourceKind::Remote => "remote",
            SourceKind::Local => "local",
        };
        f.write_str(s)
    }
}

impl SourceKind {
    /// Resolves `Auto` by looking at the template's URL scheme.
    pub fn resolve(self, template: &SegmentTemplate) -> SourceKind {
        match self {
            SourceKind::Auto => {
                let sample = template.resolve(0, 1);
                match url::Url::parse(&sample) {
                    Ok(u) if matches!(u.scheme(), "http" | "https") => SourceKind::Remote,
                    _ => SourceKind::Local,
                }
            }
            other => other,
        }
    }
}

/// Parameters shared by the remote source.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Total timeout for one segment request.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub terminal: TerminalPolicy,
    pub retry: RetryPolicy,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            terminal: TerminalPolicy::default(),
            retry: RetryPolicy::single_attempt(),
        }
    }
}

/// Source selected by configuration.
pub enum AnySource {
    Remote(RemoteSource),
    Local(LocalSource),
}

impl AnySource {
    pub fn for_template(
        template: &SegmentTemplate,
        kind: SourceKind,
        settings: &SourceSettings,
    ) -> Result<Self, SourceError> {
        match kind.resolve(template) {
            SourceKind::Local => Ok(AnySource::Local(LocalSource::new())),
            _ => {
                validate_remote_template(template)?;
                Ok(AnySource::Remote(RemoteSource::new(settings.clone())?))
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            AnySource::Remote(_) => SourceKind::Remote,
            AnySource::Local(_) => SourceKind::Local,
        }
    }
}

impl SegmentSource for AnySource {
    fn fetch(&mut self, address: &str) -> Result<Fetch, FetchError> {
        match self {
            AnySource::Remote(s) => s.fetch(address),
            AnySource::Local(s) => s.fetch(address),
        }
    }
}

fn validate_remote_template(template: &SegmentTemplate) -> Result<(), SourceError> {
    let sample = template.resolve(0, 1);
    let parsed = url::Url::parse(&sample).map_err(|source| SourceError::InvalidUrl {
        url: sample.clone(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SourceError::UnsupportedScheme(other.to_string())),
    }
}
