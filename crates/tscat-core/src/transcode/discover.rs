//! Input discovery: `dir/*.ts`-style wildcard over file names in one directory.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Anchored regex for a file-name wildcard (`*` any run, `?` one character).
pub fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re)
}

/// Files in `pattern`'s directory whose names match its last component,
/// sorted by path. Wildcards are only honoured in the file-name component.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    let name_pattern = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("pattern {pattern:?} has no file name component"))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let matcher = wildcard_regex(name_pattern).context("invalid file pattern")?;

    let mut found = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| matcher.is_match(name))
        {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}
