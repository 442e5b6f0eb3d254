//! Sequences one benchmark run: every plan entry in order, then a single
//! embedding batch over all chunk texts, then the report.

use std::path::PathBuf;

use crate::benches::{embedding, parsing};
use crate::config::HarnessConfig;
use crate::embedding::EmbeddingRegistry;
use crate::error::Result;
use crate::parsers::ParserRegistry;
use crate::report;
use crate::schema::{BenchmarkRecord, EmbeddingRecord, Report};

#[derive(Debug)]
pub enum RunOutcome {
    Completed { report: Report, output_path: PathBuf },
    /// Nothing was measured and no report was written.
    FixturesMissing(PathBuf),
}

/// Records of a run, before aggregation.
#[derive(Debug, Default)]
pub struct RunRecords {
    pub parsing: Vec<BenchmarkRecord>,
    pub embedding: Vec<EmbeddingRecord>,
}

/// Measure every plan entry, then embed the chunk texts of the successful
/// parses as one batch. Per-item failures are recorded, never returned.
pub fn benchmark_plan(
    cfg: &HarnessConfig,
    parsers: &ParserRegistry,
    embedders: &EmbeddingRegistry,
) -> RunRecords {
    let mut records = RunRecords::default();
    let mut texts = Vec::new();

    for entry in &cfg.plan {
        tracing::info!("Benchmarking {} with {} parser...", entry.file, entry.parser);
        let m = parsing::measure_with_chunks(&cfg.fixture_dir.join(&entry.file), &entry.parser, parsers);
        texts.extend(m.chunks.into_iter().map(|c| c.content));
        records.parsing.push(m.record);
    }

    tracing::info!("Benchmarking embedding for {} texts...", texts.len());
    records
        .embedding
        .push(embedding::measure(&texts, &cfg.embedding_provider, embedders));

    records
}

pub fn run(
    cfg: &HarnessConfig,
    parsers: &ParserRegistry,
    embedders: &EmbeddingRegistry,
) -> Result<RunOutcome> {
    if !cfg.fixture_dir.is_dir() {
        return Ok(RunOutcome::FixturesMissing(cfg.fixture_dir.clone()));
    }

    let unresolved = parsers.unresolved(cfg.plan.iter().map(|e| e.parser.as_str()));
    if !unresolved.is_empty() {
        tracing::warn!(?unresolved, "plan names parsers with no registered implementation");
    }
    if embedders.get(&cfg.embedding_provider).is_err() {
        let registered: Vec<&str> = embedders.names().collect();
        tracing::warn!(
            provider = %cfg.embedding_provider,
            ?registered,
            "embedding provider is not registered"
        );
    }

    let records = benchmark_plan(cfg, parsers, embedders);
    let report = report::aggregate(
        records.parsing,
        records.embedding,
        report::now_epoch_secs(),
        report::environment_version(),
    );
    report::write_json(&report, &cfg.output_path)?;

    Ok(RunOutcome::Completed {
        report,
        output_path: cfg.output_path.clone(),
    })
}
