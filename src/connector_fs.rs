//! Filesystem connector.
//!
//! Walks the configured root and returns every text file that passes the
//! include/exclude globs and the size cap. Binary and non-UTF-8 files are
//! reported as skipped rather than failing the scan.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::FilesystemConnectorConfig;
use crate::models::{ScanResult, SkipReason, SkippedFile, SourceFile};

/// Patterns that are always excluded, in addition to `exclude_globs`.
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/node_modules/**",
    "**/artifacts/**",
    "**/__pycache__/**",
    "**/target/**",
    "**/.gitignore",
    "**/*.db",
];

pub fn scan_filesystem(fs_config: &FilesystemConnectorConfig) -> Result<ScanResult> {
    let root = &fs_config.root;
    if !root.exists() {
        bail!(
            "Filesystem connector root does not exist: {}",
            root.display()
        );
    }

    let include_set = build_globset(&fs_config.include_globs)?;

    let mut excludes: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
    excludes.extend(fs_config.exclude_globs.clone());
    let exclude_set = build_globset(&excludes)?;

    let mut result = ScanResult::default();

    // Excluded directories are pruned before descending into them.
    let walker = WalkDir::new(root)
        .follow_links(fs_config.follow_symlinks)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let relative = e.path().strip_prefix(root).unwrap_or(e.path());
            !is_excluded_dir(&exclude_set, relative)
        });
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative_id(relative);

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        match read_text_file(path, &rel_str, fs_config.max_file_bytes) {
            Ok(file) => result.files.push(file),
            Err(reason) => {
                match reason {
                    SkipReason::Unreadable => warn!(file = %rel_str, "skipping unreadable file"),
                    _ => debug!(file = %rel_str, %reason, "skipping file"),
                }
                result.skipped.push(SkippedFile {
                    relative_path: rel_str,
                    reason,
                });
            }
        }
    }

    // Sort for deterministic ordering
    result
        .files
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    result
        .skipped
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    info!(
        root = %root.display(),
        files = result.files.len(),
        skipped = result.skipped.len(),
        "filesystem scan complete"
    );
    Ok(result)
}

/// A directory is excluded when its own path, or any path beneath it,
/// matches the exclude set.
fn is_excluded_dir(exclude_set: &GlobSet, relative: &Path) -> bool {
    let rel_str = relative_id(relative);
    exclude_set.is_match(&rel_str) || exclude_set.is_match(format!("{}/x", rel_str))
}

/// `/`-separated relative path, stable across platforms.
fn relative_id(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_text_file(
    path: &Path,
    relative_path: &str,
    max_file_bytes: u64,
) -> std::result::Result<SourceFile, SkipReason> {
    let metadata = std::fs::metadata(path).map_err(|_| SkipReason::Unreadable)?;
    if metadata.len() >= max_file_bytes {
        return Err(SkipReason::TooLarge);
    }

    let bytes = std::fs::read(path).map_err(|_| SkipReason::Unreadable)?;
    if bytes.contains(&0) {
        return Err(SkipReason::Binary);
    }
    let body = String::from_utf8(bytes).map_err(|_| SkipReason::NotUtf8)?;

    let modified: DateTime<Utc> = metadata
        .modified()
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        .into();

    Ok(SourceFile {
        path: path.to_path_buf(),
        relative_path: relative_path.to_string(),
        size: metadata.len(),
        modified,
        body,
    })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}
