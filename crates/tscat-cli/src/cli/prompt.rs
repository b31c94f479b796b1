//! Partial-file decision after an aborted crawl.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tscat_core::abort::{AbortAction, AbortPolicy};

/// Resolves `policy` for the partial file at `destination`, asking on the
/// terminal when the policy is `prompt`.
pub fn decide(policy: AbortPolicy, destination: &Path, failed_index: u64) -> Result<AbortAction> {
    let action = match policy {
        AbortPolicy::Keep => AbortAction::Keep,
        AbortPolicy::Discard => AbortAction::Discard,
        AbortPolicy::Prompt => ask(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    if action == AbortAction::Keep {
        println!(
            "Kept {}; continue with --resume --start {}",
            destination.display(),
            failed_index
        );
    }
    Ok(action)
}

/// Asks whether to keep the partial file. An answer containing `y` keeps it.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<AbortAction> {
    write!(output, "Save file for a retry (y/n)? ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(AbortAction::from_answer(&line))
}
