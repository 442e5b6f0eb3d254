//! Report assembly and output.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{HarnessError, Result};
use crate::schema::{BenchmarkRecord, EmbeddingRecord, Report};

pub const SUMMARY_HEADER: &str = "=== BENCHMARK SUMMARY ===";

pub fn now_epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Identifies the build that produced a report.
pub fn environment_version() -> String {
    format!(
        "{} {} ({}-{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS,
    )
}

/// Assemble a report. Record order is kept as given.
pub fn aggregate(
    parsing_results: Vec<BenchmarkRecord>,
    embedding_results: Vec<EmbeddingRecord>,
    timestamp: f64,
    environment_version: String,
) -> Report {
    Report {
        timestamp,
        environment_version,
        parsing_results,
        embedding_results,
    }
}

pub fn write_json(report: &Report, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(output_path, json).map_err(|source| HarnessError::WriteReport {
        path: output_path.to_path_buf(),
        source,
    })
}

pub fn read_json(path: &Path) -> Result<Report> {
    let bytes = fs::read(path).map_err(|source| HarnessError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn parsing_line(rec: &BenchmarkRecord) -> String {
    match rec.stats() {
        Some(stats) => format!(
            "{}: {:.2}ms, {} chunks",
            rec.file, rec.parse_time_ms, stats.chunk_count
        ),
        None => format!(
            "{}: FAILED - {}",
            rec.file,
            rec.error.as_deref().unwrap_or("Unknown error")
        ),
    }
}

pub fn embedding_line(rec: &EmbeddingRecord) -> String {
    if rec.success {
        format!(
            "Embedding: {:.2}ms for {} texts",
            rec.embed_time_ms, rec.text_count
        )
    } else {
        format!(
            "Embedding: FAILED - {}",
            rec.error.as_deref().unwrap_or("Unknown error")
        )
    }
}

/// One line per record, parsing results first.
pub fn summary_lines(report: &Report) -> Vec<String> {
    report
        .parsing_results
        .iter()
        .map(parsing_line)
        .chain(report.embedding_results.iter().map(embedding_line))
        .collect()
}

/// Diagnostic for a run that stopped before measuring anything.
pub fn fixtures_missing_line(dir: &Path) -> String {
    format!("Test files directory not found: {}", dir.display())
}

pub fn print_summary(report: &Report, output_path: &Path) {
    println!("Benchmark results saved to: {}", output_path.display());
    println!();
    println!("{SUMMARY_HEADER}");
    for line in summary_lines(report) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParseStats;
    use tempfile::tempdir;

    fn sample_report() -> Report {
        let ok = BenchmarkRecord::succeeded(
            "sample.md".to_string(),
            "markdown".to_string(),
            1.234,
            ParseStats {
                chunk_count: 3,
                total_chunk_size: 30,
                avg_chunk_size: 10.0,
            },
        );
        let bad = BenchmarkRecord::failed(
            "sample.vue".to_string(),
            "vue".to_string(),
            0.5,
            "unclosed <script> block".to_string(),
        );
        let embed = EmbeddingRecord::succeeded("fake".to_string(), 3, 0.3, 0.1);

        aggregate(
            vec![ok, bad],
            vec![embed],
            1_700_000_000.5,
            environment_version(),
        )
    }

    #[test]
    fn test_aggregate_preserves_order() {
        let report = sample_report();
        let files: Vec<_> = report.parsing_results.iter().map(|r| r.file.as_str()).collect();

        assert_eq!(files, vec!["sample.md", "sample.vue"]);
        assert_eq!(report.timestamp, 1_700_000_000.5);
        assert!(report.environment_version.starts_with("parser-contract-bench "));
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json(&report, &path).unwrap();
        let decoded = read_json(&path).unwrap();

        assert_eq!(decoded, report);
        assert_eq!(decoded.parsing_results.len(), 2);
        assert_eq!(decoded.embedding_results.len(), 1);
    }

    #[test]
    fn test_json_top_level_fields() {
        let value = serde_json::to_value(sample_report()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort();

        assert_eq!(
            keys,
            vec!["embedding_results", "environment_version", "parsing_results", "timestamp"]
        );
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");

        let err = write_json(&sample_report(), &path).unwrap_err();
        assert!(matches!(err, HarnessError::WriteReport { .. }));
    }

    #[test]
    fn test_fixtures_missing_line_names_dir() {
        let dir = Path::new("/tmp/bench/fixtures");
        assert_eq!(
            fixtures_missing_line(dir),
            "Test files directory not found: /tmp/bench/fixtures"
        );
    }

    #[test]
    fn test_summary_lines() {
        let mut report = sample_report();
        report.embedding_results.push(EmbeddingRecord::failed(
            "openai".to_string(),
            3,
            0.0,
            "Unknown embedding provider: openai".to_string(),
        ));

        assert_eq!(
            summary_lines(&report),
            vec![
                "sample.md: 1.23ms, 3 chunks",
                "sample.vue: FAILED - unclosed <script> block",
                "Embedding: 0.30ms for 3 texts",
                "Embedding: FAILED - Unknown embedding provider: openai",
            ]
        );
    }
}
