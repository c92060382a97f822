use anyhow::{Context, Result};
use arithprof::{
    cli::Cli,
    filter::FunctionFilter,
    profiler::{Profiler, ProfilerConfig},
    replay,
};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for diagnostic output
fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(io::stderr)
            .init();
    }
}

/// Open the report sink. Failure is fatal before any instrumentation.
fn open_output(path: &Path) -> Result<Box<dyn Write + Send>> {
    let file = File::create(path)
        .with_context(|| format!("cannot open output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Open the recorded event stream (`-` means stdin)
fn open_trace(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("cannot open trace file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let filter = FunctionFilter::from_patterns(cli.functions.iter().cloned());
    if filter.is_empty() {
        eprintln!("No function filter set. Instrumenting all functions.");
    } else {
        for name in &cli.functions {
            eprintln!("Filtering function: {name}");
        }
    }

    let sink = open_output(&cli.output)?;
    let config = ProfilerConfig {
        track_calls: !cli.no_call_tracking,
        include_libraries: cli.include_libraries,
        filter,
    };
    let profiler = Profiler::new(config, sink);

    let trace = open_trace(&cli.trace)?;
    let events = replay::replay(trace, &profiler)
        .with_context(|| format!("failed to replay trace: {}", cli.trace.display()))?;

    eprintln!(
        "Profiling complete ({events} events). Report written to: {}",
        cli.output.display()
    );
    Ok(())
}
