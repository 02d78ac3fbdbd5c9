//! TOML configuration for `ctxc`.
//!
//! ```toml
//! [chunking]
//! chunk_size = 500
//! overlap_size = 100
//!
//! [connectors.filesystem]
//! root = "./docs"
//! include_globs = ["**/*"]
//! exclude_globs = ["drafts/**"]
//! follow_symlinks = false
//! max_file_bytes = 100000
//! ```
//!
//! Every key is optional. `[connectors.filesystem]` is only required by
//! `ctxc ingest`.

use anyhow::{Context, Result};
use context_chunker_core::ChunkingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConnectorsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<FilesystemConnectorConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesystemConnectorConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Files of this size or larger are skipped.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*".to_string()]
}

fn default_max_file_bytes() -> u64 {
    100_000
}

impl FilesystemConnectorConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Render the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

/// Parse and validate a config document.
///
/// Chunk sizes are validated while deserializing `[chunking]`.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if let Some(fs) = &config.connectors.filesystem {
        if fs.max_file_bytes == 0 {
            anyhow::bail!("connectors.filesystem.max_file_bytes must be > 0");
        }
    }

    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(Config::minimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.chunking.chunk_size(), 500);
        assert_eq!(cfg.chunking.overlap_size(), 100);
        assert!(cfg.connectors.filesystem.is_none());
    }

    #[test]
    fn test_full_config() {
        let cfg = parse_config(
            r#"
[chunking]
chunk_size = 200
overlap_size = 40

[connectors.filesystem]
root = "/tmp/docs"
exclude_globs = ["drafts/**"]
max_file_bytes = 5000
"#,
        )
        .unwrap();
        assert_eq!(cfg.chunking.chunk_size(), 200);
        assert_eq!(cfg.chunking.overlap_size(), 40);
        let fs = cfg.connectors.filesystem.unwrap();
        assert_eq!(fs.root, PathBuf::from("/tmp/docs"));
        assert_eq!(fs.include_globs, vec!["**/*".to_string()]);
        assert_eq!(fs.exclude_globs, vec!["drafts/**".to_string()]);
        assert!(!fs.follow_symlinks);
        assert_eq!(fs.max_file_bytes, 5000);
    }

    #[test]
    fn test_partial_chunking_table() {
        let cfg = parse_config("[chunking]\nchunk_size = 300\n").unwrap();
        assert_eq!(cfg.chunking.chunk_size(), 300);
        assert_eq!(cfg.chunking.overlap_size(), 100);

        // the default overlap (100) no longer fits
        assert!(parse_config("[chunking]\nchunk_size = 50\n").is_err());
    }

    #[test]
    fn test_invalid_chunking_rejected() {
        let err = parse_config("[chunking]\nchunk_size = 10\noverlap_size = 15\n").unwrap_err();
        assert!(format!("{:#}", err).contains("overlap_size"));
        assert!(parse_config("[chunking]\nchunk_size = 5\noverlap_size = 0\n").is_err());
    }

    #[test]
    fn test_zero_max_file_bytes_rejected() {
        let err = parse_config("[connectors.filesystem]\nroot = \".\"\nmax_file_bytes = 0\n")
            .unwrap_err();
        assert!(err.to_string().contains("max_file_bytes"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let cfg = load_or_default(Path::new("/definitely/not/here/ctxc.toml")).unwrap();
        assert_eq!(cfg.chunking, ChunkingConfig::default());
        assert!(load_config(Path::new("/definitely/not/here/ctxc.toml")).is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut cfg = Config::minimal();
        cfg.connectors.filesystem = Some(FilesystemConnectorConfig::new("/srv/docs"));
        let rendered = cfg.to_toml().unwrap();
        let parsed = parse_config(&rendered).unwrap();
        assert_eq!(parsed.chunking, cfg.chunking);
        assert_eq!(
            parsed.connectors.filesystem.unwrap().root,
            PathBuf::from("/srv/docs")
        );
    }
}
