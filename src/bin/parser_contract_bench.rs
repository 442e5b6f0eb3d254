use clap::Parser;
use parser_contract_bench::config::HarnessConfig;
use parser_contract_bench::driver::{self, RunOutcome};
use parser_contract_bench::embedding::EmbeddingRegistry;
use parser_contract_bench::parsers::ParserRegistry;
use parser_contract_bench::report;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parser-contract-bench")]
#[command(version)]
#[command(about = "Times the bundled fixtures through each parser and the fake embedder (JSON output)")]
struct Args {}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> parser_contract_bench::Result<()> {
    let _args = Args::parse();
    init_logging();

    let cfg = HarnessConfig::default();
    match driver::run(&cfg, &ParserRegistry::builtin(), &EmbeddingRegistry::builtin())? {
        RunOutcome::Completed {
            report,
            output_path,
        } => report::print_summary(&report, &output_path),
        RunOutcome::FixturesMissing(dir) => {
            println!("{}", report::fixtures_missing_line(&dir));
        }
    }

    Ok(())
}
