//! Integration tests for the batch transcoder using a stand-in tool script.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::tempdir;
use tscat_core::transcode::{batch_convert, discover, TranscodeSettings};

/// Writes an executable script that sleeps, then copies the `-i` input to the
/// last argument (the output path). Exits 1 for inputs named `bad*`.
fn fake_tool(dir: &Path) -> PathBuf {
    let path = dir.join("fake-ffmpeg");
    let script = r#"#!/bin/sh
input=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-i" ]; then input="$arg"; fi
  prev="$arg"
  last="$arg"
done
sleep 0.3
case "$(basename "$input")" in
  bad*) exit 1 ;;
esac
cp "$input" "$last"
"#;
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn barrier_waits_for_every_conversion() {
    let tools = tempdir().unwrap();
    let media = tempdir().unwrap();
    for i in 0..6 {
        std::fs::write(media.path().join(format!("clip{i}.ts")), format!("clip {i}")).unwrap();
    }
    let settings = TranscodeSettings {
        program: fake_tool(tools.path()).to_string_lossy().into_owned(),
        max_parallel: Some(3),
        ..TranscodeSettings::default()
    };
    let inputs = discover(media.path().join("*.ts").to_str().unwrap()).unwrap();
    assert_eq!(inputs.len(), 6);

    let started = Instant::now();
    let mut remaining = Vec::new();
    let summary = batch_convert(&settings, inputs, |n| remaining.push(n)).await;

    assert_eq!(summary.total, 6);
    assert_eq!(summary.converted, 6);
    assert_eq!(summary.failed, 0);
    assert_eq!(remaining, vec![5, 4, 3, 2, 1, 0]);
    // Two waves of three 0.3s conversions.
    assert!(started.elapsed() >= Duration::from_millis(550));
    for i in 0..6 {
        let out = media.path().join(format!("clip{i}.mp4"));
        assert_eq!(std::fs::read_to_string(out).unwrap(), format!("clip {i}"));
    }
}

#[tokio::test]
async fn failed_conversion_is_counted_not_returned() {
    let tools = tempdir().unwrap();
    let media = tempdir().unwrap();
    std::fs::write(media.path().join("good.ts"), b"ok").unwrap();
    std::fs::write(media.path().join("bad.ts"), b"broken").unwrap();
    let settings = TranscodeSettings {
        program: fake_tool(tools.path()).to_string_lossy().into_owned(),
        ..TranscodeSettings::default()
    };
    let inputs = discover(media.path().join("*.ts").to_str().unwrap()).unwrap();

    let summary = batch_convert(&settings, inputs, |_| {}).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed, 1);
    assert!(media.path().join("good.mp4").exists());
    assert!(!media.path().join("bad.mp4").exists());
}
