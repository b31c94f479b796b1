//! Single-file conversion through the external tool.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use super::TranscodeSettings;

/// Same base name, converted extension.
pub fn output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension.trim_start_matches('.'))
}

/// Arguments for one quiet conversion: input, video codec, audio codec, output.
pub fn transcode_args(settings: &TranscodeSettings, input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostats", "-loglevel", "quiet", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());
    args.push("-c:v".into());
    args.push(settings.video_codec.clone().into());
    args.push("-c:a".into());
    args.push(settings.audio_codec.clone().into());
    args.push(output.as_os_str().to_owned());
    args
}

/// Runs the tool for `input` and returns the output path on success.
pub async fn convert_one(settings: &TranscodeSettings, input: &Path) -> Result<PathBuf> {
    let output = output_path(input, &settings.output_extension);
    tracing::debug!(input = %input.display(), output = %output.display(), "starting conversion");
    let status = tokio::process::Command::new(&settings.program)
        .args(transcode_args(settings, input, &output))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("failed to run {}", settings.program))?;
    if !status.success() {
        anyhow::bail!(
            "{} exited with {} for {}",
            settings.program,
            status,
            input.display()
        );
    }
    Ok(output)
}
