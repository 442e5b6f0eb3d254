//! Contract benchmarks for content-type parsers and embedding generation.
//!
//! Times each fixture file through its parser, times one embedding batch
//! over the resulting chunks, and writes a JSON report for comparison
//! against other implementations.

pub mod benches;
pub mod config;
pub mod driver;
pub mod embedding;
pub mod error;
pub mod harness;
pub mod parsers;
pub mod report;
pub mod schema;

pub use error::{HarnessError, Result};
