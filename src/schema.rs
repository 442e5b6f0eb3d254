//! Report schema.
//!
//! Field names are stable; they are what cross-implementation comparison
//! scripts key on. Values that do not apply to an outcome (stats of a
//! failed parse, the error of a successful one) are omitted from JSON.
//!
//! A successful parse that produced zero chunks is still a success
//! (`success: true, chunk_count: 0`). Whether such a record is comparable
//! with a baseline is left to the consumer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    pub chunk_count: usize,
    pub total_chunk_size: usize,
    pub avg_chunk_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub file: String,
    /// Parser identifier as requested, which may be one no registry knows.
    pub parser: String,
    pub parse_time_ms: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_chunk_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_chunk_size: Option<f64>,

    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BenchmarkRecord {
    pub fn succeeded(file: String, parser: String, parse_time_ms: f64, stats: ParseStats) -> Self {
        Self {
            file,
            parser,
            parse_time_ms,
            chunk_count: Some(stats.chunk_count),
            total_chunk_size: Some(stats.total_chunk_size),
            avg_chunk_size: Some(stats.avg_chunk_size),
            success: true,
            error: None,
        }
    }

    pub fn failed(file: String, parser: String, parse_time_ms: f64, error: String) -> Self {
        Self {
            file,
            parser,
            parse_time_ms,
            chunk_count: None,
            total_chunk_size: None,
            avg_chunk_size: None,
            success: false,
            error: Some(error),
        }
    }

    /// Stats of a successful parse, `None` for a failure.
    pub fn stats(&self) -> Option<ParseStats> {
        match (self.chunk_count, self.total_chunk_size, self.avg_chunk_size) {
            (Some(chunk_count), Some(total_chunk_size), Some(avg_chunk_size)) if self.success => {
                Some(ParseStats {
                    chunk_count,
                    total_chunk_size,
                    avg_chunk_size,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub embedding_provider: String,
    pub text_count: usize,
    pub embed_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_embed_time_per_text_ms: Option<f64>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmbeddingRecord {
    pub fn succeeded(
        embedding_provider: String,
        text_count: usize,
        embed_time_ms: f64,
        avg_embed_time_per_text_ms: f64,
    ) -> Self {
        Self {
            embedding_provider,
            text_count,
            embed_time_ms,
            avg_embed_time_per_text_ms: Some(avg_embed_time_per_text_ms),
            success: true,
            error: None,
        }
    }

    pub fn failed(
        embedding_provider: String,
        text_count: usize,
        embed_time_ms: f64,
        error: String,
    ) -> Self {
        Self {
            embedding_provider,
            text_count,
            embed_time_ms,
            avg_embed_time_per_text_ms: None,
            success: false,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Seconds since the Unix epoch when the run was aggregated.
    pub timestamp: f64,
    pub environment_version: String,
    pub parsing_results: Vec<BenchmarkRecord>,
    pub embedding_results: Vec<EmbeddingRecord>,
}
