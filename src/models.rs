//! Data models used by the ingest pipeline.
//!
//! Chunk types live in `context-chunker-core`; this module only adds what
//! the filesystem side produces.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub use context_chunker_core::ChunkRecord;

/// A text file discovered by the filesystem connector.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the connector root, `/`-separated. Used as the file
    /// identifier in chunk records.
    pub relative_path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub body: String,
}

/// Why a file found during a scan was not ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooLarge,
    Binary,
    NotUtf8,
    Unreadable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkipReason::TooLarge => "too large",
            SkipReason::Binary => "binary",
            SkipReason::NotUtf8 => "not utf-8",
            SkipReason::Unreadable => "unreadable",
        };
        f.write_str(s)
    }
}

/// A file the connector passed over, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: SkipReason,
}

/// Result of one filesystem scan.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}
