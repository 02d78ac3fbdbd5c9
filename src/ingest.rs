//! Ingest pipeline orchestration.
//!
//! Coordinates the flow: filesystem connector → chunking → chunk records.
//! Records are written as JSON Lines, one per chunk, ready to be embedded
//! and stored by a downstream vector index. The summary goes to stderr so
//! stdout stays parseable.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use context_chunker_core::Chunker;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::connector_fs;
use crate::models::{ChunkRecord, SourceFile};

/// Options for a single `ctxc ingest` run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Show file and chunk counts without writing records.
    pub dry_run: bool,
    /// Maximum number of files to process.
    pub limit: Option<usize>,
    /// Only process files modified on or after this date (YYYY-MM-DD).
    pub since: Option<String>,
    /// Write records here instead of stdout.
    pub output: Option<PathBuf>,
}

/// Counters reported at the end of an ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub files: usize,
    pub chunks: usize,
    pub skipped: usize,
}

pub fn run_ingest(config: &Config, options: &IngestOptions) -> Result<IngestSummary> {
    let summary = match &options.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut out = std::io::BufWriter::new(file);
            let summary = ingest_to(config, options, &mut out)?;
            out.flush()?;
            summary
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            ingest_to(config, options, &mut out)?
        }
    };

    if options.dry_run {
        eprintln!("ingest filesystem (dry-run)");
        eprintln!("  files found: {}", summary.files);
        eprintln!("  estimated chunks: {}", summary.chunks);
    } else {
        eprintln!("ingest filesystem");
        eprintln!("  files: {}", summary.files);
        eprintln!("  chunks written: {}", summary.chunks);
    }
    eprintln!("  skipped: {}", summary.skipped);
    eprintln!("ok");

    Ok(summary)
}

/// Scan, chunk, and write records to `out`.
pub fn ingest_to<W: Write>(
    config: &Config,
    options: &IngestOptions,
    out: &mut W,
) -> Result<IngestSummary> {
    let fs_config = config
        .connectors
        .filesystem
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Filesystem connector not configured"))?;

    let scan = connector_fs::scan_filesystem(fs_config)?;
    let mut files = scan.files;

    // Apply --since filter
    if let Some(ref since_str) = options.since {
        let since_date = NaiveDate::parse_from_str(since_str, "%Y-%m-%d")
            .with_context(|| format!("Invalid --since date (expected YYYY-MM-DD): {}", since_str))?;
        let since_ts = since_date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| anyhow::anyhow!("Invalid --since date: {}", since_str))?;
        files.retain(|file| file.modified >= since_ts);
    }

    // Apply --limit
    if let Some(lim) = options.limit {
        files.truncate(lim);
    }

    let chunker = Chunker::new(config.chunking);
    let mut summary = IngestSummary {
        files: files.len(),
        chunks: 0,
        skipped: scan.skipped.len(),
    };

    for file in &files {
        let written = if options.dry_run {
            chunker.chunks(&file.body).count()
        } else {
            write_records(&chunker, file, out)?
        };
        debug!(file = %file.path.display(), chunks = written, "chunked file");
        summary.chunks += written;
    }

    info!(
        files = summary.files,
        chunks = summary.chunks,
        skipped = summary.skipped,
        dry_run = options.dry_run,
        "ingest complete"
    );
    Ok(summary)
}

fn write_records<W: Write>(chunker: &Chunker, file: &SourceFile, out: &mut W) -> Result<usize> {
    let mut count = 0;
    for record in chunker.records(&file.relative_path, &file.body) {
        write_record(&record, out)?;
        count += 1;
    }
    Ok(count)
}

pub fn write_record<W: Write>(record: &ChunkRecord, out: &mut W) -> Result<()> {
    let line = record.to_json_line()?;
    writeln!(out, "{}", line).context("Failed to write chunk record")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilesystemConnectorConfig;
    use context_chunker_core::{fingerprint, ChunkingConfig};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.txt"),
            "This is a test text for the text_to_chunks method.",
        )
        .unwrap();
        fs::write(tmp.path().join("b.md"), "Short text.").unwrap();
        fs::write(tmp.path().join("c.txt"), "").unwrap();
        fs::write(tmp.path().join("blob.bin"), [0u8, 1, 2]).unwrap();

        let mut config = Config::minimal();
        config.chunking = ChunkingConfig::new(10, 5).unwrap();
        config.connectors.filesystem = Some(FilesystemConnectorConfig::new(tmp.path()));
        (tmp, config)
    }

    fn records(buf: &[u8]) -> Vec<ChunkRecord> {
        String::from_utf8(buf.to_vec())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_ingest_writes_json_lines() {
        let (_tmp, config) = setup();
        let mut buf = Vec::new();
        let summary = ingest_to(&config, &IngestOptions::default(), &mut buf).unwrap();

        assert_eq!(
            summary,
            IngestSummary {
                files: 3,
                chunks: 8,
                skipped: 1
            }
        );

        let recs = records(&buf);
        assert_eq!(recs.len(), 8);
        assert!(recs[..7].iter().all(|r| r.file == "a.txt"));
        assert_eq!(recs[2].text, "test text for");
        assert_eq!((recs[2].start, recs[2].end), (10, 23));
        assert_eq!(recs[2].id, fingerprint("a.txt", 10, 23, "test text for"));
        assert_eq!(recs[7].file, "b.md");
        assert_eq!((recs[7].start, recs[7].end), (0, 11));
    }

    #[test]
    fn test_dry_run_counts_without_writing() {
        let (_tmp, config) = setup();
        let mut buf = Vec::new();
        let options = IngestOptions {
            dry_run: true,
            ..Default::default()
        };
        let summary = ingest_to(&config, &options, &mut buf).unwrap();
        assert_eq!(summary.chunks, 8);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_limit_truncates_files() {
        let (_tmp, config) = setup();
        let mut buf = Vec::new();
        let options = IngestOptions {
            limit: Some(1),
            ..Default::default()
        };
        let summary = ingest_to(&config, &options, &mut buf).unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.chunks, 7);
    }

    #[test]
    fn test_since_filter() {
        let (_tmp, config) = setup();
        let mut buf = Vec::new();
        let future = IngestOptions {
            since: Some("2999-01-01".to_string()),
            ..Default::default()
        };
        let summary = ingest_to(&config, &future, &mut buf).unwrap();
        assert_eq!(summary.files, 0);

        let past = IngestOptions {
            since: Some("2000-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(ingest_to(&config, &past, &mut buf).unwrap().files, 3);

        let bad = IngestOptions {
            since: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(ingest_to(&config, &bad, &mut buf).is_err());
    }

    #[test]
    fn test_requires_filesystem_connector() {
        let config = Config::minimal();
        let mut buf = Vec::new();
        let err = ingest_to(&config, &IngestOptions::default(), &mut buf).unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_run_ingest_to_output_file() {
        let (_tmp, config) = setup();
        let out_dir = TempDir::new().unwrap();
        let out_path = out_dir.path().join("chunks.jsonl");
        let options = IngestOptions {
            output: Some(out_path.clone()),
            ..Default::default()
        };
        let summary = run_ingest(&config, &options).unwrap();
        assert_eq!(summary.chunks, 8);
        let written = fs::read(&out_path).unwrap();
        assert_eq!(records(&written).len(), 8);
    }
}
