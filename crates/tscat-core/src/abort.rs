//! What happens to a partial destination after an aborted crawl.
//!
//! The partial file is either kept, so a later crawl with `resume` can append
//! from the failed index, or deleted. `Prompt` defers the choice to the
//! front end (the CLI asks the operator).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbortPolicy {
    Keep,
    Discard,
    #[default]
    Prompt,
}

impl FromStr for AbortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(AbortPolicy::Keep),
            "discard" => Ok(AbortPolicy::Discard),
            "prompt" => Ok(AbortPolicy::Prompt),
            other => Err(format!("unknown abort policy {other:?} (keep, discard, prompt)")),
        }
    }
}

impl fmt::Display for AbortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbortPolicy::Keep => "keep",
            AbortPolicy::Discard => "discard",
            AbortPolicy::Prompt => "prompt",
        };
        f.write_str(s)
    }
}

/// Resolved decision for one aborted crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortAction {
    Keep,
    Discard,
}

impl AbortAction {
    /// Interprets an operator answer: anything containing `y` keeps the file.
    pub fn from_answer(answer: &str) -> Self {
        if answer.to_ascii_lowercase().contains('y') {
            AbortAction::Keep
        } else {
            AbortAction::Discard
        }
    }
}

/// Applies `action` to the partial file at `path`. Discarding a file that is
/// already gone is not an error.
pub fn apply(path: &Path, action: AbortAction) -> io::Result<()> {
    match action {
        AbortAction::Keep => {
            tracing::info!(path = %path.display(), "keeping partial file for a resumed crawl");
            Ok(())
        }
        AbortAction::Discard => match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed partial file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        },
    }
}
