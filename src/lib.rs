//! # Context Chunker
//!
//! Turns text files into overlapping, whitespace-snapped chunks ready for
//! embedding into a vector index.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ Filesystem  │──▶│   Chunker   │──▶│ JSON Lines   │
//! │  connector  │   │ (core crate)│   │ chunk records│
//! └─────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! Each record carries `{file, start, end, text}` plus a SHA-256 fingerprint,
//! which downstream embedding and vector-store tools use as the chunk id.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Scan results and source files |
//! | [`connector_fs`] | Filesystem connector |
//! | [`ingest`] | Scan → chunk → JSON Lines pipeline |
//! | [`chunk_cmd`] | Single-file chunking |
//!
//! The chunking algorithm itself lives in `context-chunker-core`.

pub mod chunk_cmd;
pub mod config;
pub mod connector_fs;
pub mod ingest;
pub mod models;
