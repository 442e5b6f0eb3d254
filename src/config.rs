//! Run configuration.
//!
//! The binary always runs with [`HarnessConfig::default`]; the fields exist
//! so tests can point a run at scratch directories.

use std::path::PathBuf;

use crate::embedding::FAKE_PROVIDER;

/// Report file name, written at the crate root.
pub const REPORT_FILE: &str = "benchmark_results.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// File name relative to the fixture directory.
    pub file: String,
    /// Parser identifier.
    pub parser: String,
}

impl PlanEntry {
    pub fn new(file: &str, parser: &str) -> Self {
        Self {
            file: file.to_string(),
            parser: parser.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub fixture_dir: PathBuf,
    pub output_path: PathBuf,
    /// Benchmarked in this order.
    pub plan: Vec<PlanEntry>,
    pub embedding_provider: String,
}

pub fn default_plan() -> Vec<PlanEntry> {
    vec![
        PlanEntry::new("sample.md", "markdown"),
        PlanEntry::new("sample.yaml", "yaml"),
        PlanEntry::new("sample.vue", "vue"),
        PlanEntry::new("sample.cs", "code"),
    ]
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        Self {
            fixture_dir: root.join("fixtures"),
            output_path: root.join(REPORT_FILE),
            plan: default_plan(),
            embedding_provider: FAKE_PROVIDER.to_string(),
        }
    }
}
