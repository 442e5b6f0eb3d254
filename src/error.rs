//! Error types for the contract bench.

use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbedError;
use crate::parsers::{ParseError, ParserKind};

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Unknown parser: {0}")]
    UnknownParser(String),

    #[error("Parser '{0}' is not registered")]
    UnregisteredParser(ParserKind),

    #[error("Unknown embedding provider: {0}")]
    UnknownProvider(String),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} parser failed: {source}")]
    Parse {
        kind: ParserKind,
        #[source]
        source: ParseError,
    },

    #[error("Embedding provider '{provider}' failed: {source}")]
    Embed {
        provider: String,
        #[source]
        source: EmbedError,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
