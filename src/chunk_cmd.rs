//! `ctxc chunk`: chunk a single file or stdin and print the result.

use anyhow::{bail, Context, Result};
use context_chunker_core::{ChunkRecord, Chunker, ChunkingConfig};
use std::io::{Read, Write};
use std::path::Path;

use crate::config::Config;
use crate::ingest::write_record;

/// File identifier used for records read from stdin.
pub const STDIN_ID: &str = "<stdin>";

/// How chunks are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `file:start-end` header followed by the chunk text.
    Text,
    /// One JSON chunk record per line.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            other => bail!("Unknown format: '{}'. Must be text or json.", other),
        }
    }
}

/// Resolve chunk sizes: CLI flags win over the config file.
pub fn resolve_chunking(
    config: &Config,
    chunk_size: Option<usize>,
    overlap_size: Option<usize>,
) -> Result<ChunkingConfig> {
    let chunk_size = chunk_size.unwrap_or(config.chunking.chunk_size());
    let overlap_size = overlap_size.unwrap_or(config.chunking.overlap_size());
    Ok(ChunkingConfig::new(chunk_size, overlap_size)?)
}

pub fn run_chunk(
    config: &Config,
    path: &Path,
    chunk_size: Option<usize>,
    overlap_size: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let chunking = resolve_chunking(config, chunk_size, overlap_size)?;

    let (file_id, text) = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        (STDIN_ID.to_string(), buf)
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        (path.display().to_string(), text)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_chunks(&Chunker::new(chunking), &file_id, &text, format, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write every chunk of `text` to `out` in the requested format.
pub fn print_chunks<W: Write>(
    chunker: &Chunker,
    file_id: &str,
    text: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize> {
    let mut count = 0;
    for chunk in chunker.chunks(text) {
        match format {
            OutputFormat::Text => {
                writeln!(out, "{}:{}-{}", file_id, chunk.start, chunk.end)?;
                writeln!(out, "{}", chunk.text)?;
            }
            OutputFormat::Json => {
                write_record(&ChunkRecord::from_chunk(file_id, &chunk), out)?;
            }
        }
        count += 1;
    }
    tracing::debug!(file = file_id, chunks = count, "printed chunks");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::minimal();
        let c = resolve_chunking(&config, Some(10), Some(5)).unwrap();
        assert_eq!((c.chunk_size(), c.overlap_size()), (10, 5));

        let c = resolve_chunking(&config, None, None).unwrap();
        assert_eq!((c.chunk_size(), c.overlap_size()), (500, 100));

        // overlap from config (100) exceeds the flag chunk size
        assert!(resolve_chunking(&config, Some(50), None).is_err());
    }

    #[test]
    fn test_print_text() {
        let chunker = Chunker::new(ChunkingConfig::new(50, 5).unwrap());
        let mut buf = Vec::new();
        let n = print_chunks(&chunker, "s.txt", "Short text.", OutputFormat::Text, &mut buf)
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(String::from_utf8(buf).unwrap(), "s.txt:0-11\nShort text.\n");
    }

    #[test]
    fn test_print_json() {
        let chunker = Chunker::new(ChunkingConfig::new(10, 5).unwrap());
        let mut buf = Vec::new();
        let n = print_chunks(
            &chunker,
            STDIN_ID,
            "This is a test text for the text_to_chunks method.",
            OutputFormat::Json,
            &mut buf,
        )
        .unwrap();
        assert_eq!(n, 7);
        let out = String::from_utf8(buf).unwrap();
        let first: ChunkRecord = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(first.file, "<stdin>");
        assert_eq!(first.text, "This is a ");
    }
}
