use anyhow::{Context, Result};
use benchfold::cli::{Cli, OutputFormat};
use benchfold::{aggregate_reader, csv_output, json_output, Summary};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read the log named on the command line, or stdin
fn read_summary(args: &Cli) -> Result<Summary> {
    let config = args.aggregator_config();
    let summary = match args.log_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open log {}", path.display()))?;
            aggregate_reader(BufReader::new(file), config)
                .with_context(|| format!("Failed to summarize {}", path.display()))?
        }
        None => aggregate_reader(io::stdin().lock(), config)
            .context("Failed to summarize stdin")?,
    };
    Ok(summary)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let summary = read_summary(&args)?;

    let output = match args.format {
        OutputFormat::Csv => csv_output::render(&summary),
        OutputFormat::Json => {
            let mut json = json_output::render(&summary)?;
            json.push('\n');
            json
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
