//! Timed parse of one (file, parser) pair.

use std::fs;
use std::path::Path;

use crate::error::{HarnessError, Result};
use crate::harness::{mean_or_zero, time_fallible};
use crate::parsers::{Chunk, ParserRegistry};
use crate::schema::{BenchmarkRecord, ParseStats};

#[derive(Debug, Clone)]
pub struct ParseMeasurement {
    pub record: BenchmarkRecord,
    /// Chunks from a successful parse; empty on failure.
    pub chunks: Vec<Chunk>,
}

pub fn chunk_stats(chunks: &[Chunk]) -> ParseStats {
    let total_chunk_size: usize = chunks.iter().map(Chunk::len_chars).sum();
    ParseStats {
        chunk_count: chunks.len(),
        total_chunk_size,
        avg_chunk_size: mean_or_zero(total_chunk_size as f64, chunks.len()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_and_parse(path: &Path, parser: &str, registry: &ParserRegistry) -> Result<Vec<Chunk>> {
    let parser = registry.construct(parser)?;
    let content = fs::read_to_string(path).map_err(|source| HarnessError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parser
        .parse(&content, path)
        .map_err(|source| HarnessError::Parse {
            kind: parser.kind(),
            source,
        })
}

/// Parse `path` with the parser registered as `parser`, timing the
/// lookup, the read and the parse together.
///
/// Never fails: lookup, I/O and parser errors all become a failure
/// record carrying the time spent up to the error.
pub fn measure_with_chunks(path: &Path, parser: &str, registry: &ParserRegistry) -> ParseMeasurement {
    let timed = time_fallible(|| read_and_parse(path, parser, registry));
    let elapsed_ms = timed.elapsed_ms();
    let file = display_name(path);

    match timed.result {
        Ok(chunks) => {
            let stats = chunk_stats(&chunks);
            tracing::debug!(
                file = %file,
                parser,
                chunks = stats.chunk_count,
                elapsed_ms,
                "parsed"
            );
            ParseMeasurement {
                record: BenchmarkRecord::succeeded(file, parser.to_string(), elapsed_ms, stats),
                chunks,
            }
        }
        Err(e) => {
            tracing::warn!(file = %file, parser, error = %e, "parse benchmark failed");
            ParseMeasurement {
                record: BenchmarkRecord::failed(file, parser.to_string(), elapsed_ms, e.to_string()),
                chunks: Vec::new(),
            }
        }
    }
}

pub fn measure(path: &Path, parser: &str, registry: &ParserRegistry) -> BenchmarkRecord {
    measure_with_chunks(path, parser, registry).record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use tempfile::tempdir;

    #[test]
    fn test_every_fixture_parses() {
        let cfg = HarnessConfig::default();
        let registry = ParserRegistry::builtin();

        for entry in &cfg.plan {
            let rec = measure(&cfg.fixture_dir.join(&entry.file), &entry.parser, &registry);

            assert!(rec.success, "{}: {:?}", rec.file, rec.error);
            assert!(rec.parse_time_ms >= 0.0);
            assert!(rec.chunk_count.unwrap() > 0);
            assert!(rec.error.is_none());
        }
    }

    #[test]
    fn test_unknown_parser_is_failure_record() {
        let cfg = HarnessConfig::default();
        let rec = measure(
            &cfg.fixture_dir.join("sample.md"),
            "restructuredtext",
            &ParserRegistry::builtin(),
        );

        assert!(!rec.success);
        assert!(rec.parse_time_ms >= 0.0);
        assert_eq!(rec.parser, "restructuredtext");
        assert_eq!(rec.error.as_deref(), Some("Unknown parser: restructuredtext"));
        assert!(rec.chunk_count.is_none());
    }

    #[test]
    fn test_missing_file_is_failure_record() {
        let dir = tempdir().unwrap();
        let m = measure_with_chunks(
            &dir.path().join("nope.md"),
            "markdown",
            &ParserRegistry::builtin(),
        );

        assert!(!m.record.success);
        assert_eq!(m.record.file, "nope.md");
        assert!(m.record.error.unwrap().starts_with("Failed to read"));
        assert!(m.chunks.is_empty());
    }

    #[test]
    fn test_non_utf8_file_is_failure_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let rec = measure(&path, "markdown", &ParserRegistry::builtin());
        assert!(!rec.success);
    }

    #[test]
    fn test_parser_error_is_failure_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "a: [1, 2\n").unwrap();

        let rec = measure(&path, "yaml", &ParserRegistry::builtin());
        assert!(!rec.success);
        assert!(rec.error.unwrap().starts_with("yaml parser failed"));
    }

    #[test]
    fn test_empty_file_succeeds_with_zero_chunks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.md");
        fs::write(&path, "").unwrap();

        let rec = measure(&path, "markdown", &ParserRegistry::builtin());
        assert!(rec.success);
        assert_eq!(rec.chunk_count, Some(0));
        assert_eq!(rec.total_chunk_size, Some(0));
        assert_eq!(rec.avg_chunk_size, Some(0.0));
    }

    #[test]
    fn test_chunk_stats_counts_chars() {
        let chunks = vec![
            Chunk {
                content: "héllo".to_string(),
                start_line: 1,
                end_line: 1,
            },
            Chunk {
                content: "abc".to_string(),
                start_line: 2,
                end_line: 2,
            },
        ];
        let stats = chunk_stats(&chunks);

        assert_eq!(stats.chunk_count, 2);
        assert_eq!(stats.total_chunk_size, 8);
        assert_eq!(stats.avg_chunk_size, 4.0);
        assert_eq!(chunk_stats(&[]).avg_chunk_size, 0.0);
    }
}
