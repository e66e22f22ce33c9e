use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::{BracketTableLoader, write_summary};
use tracing_subscriber::EnvFilter;

/// Validate a bracket table CSV file and print the schedules it defines.
///
/// The CSV file should have the following columns:
/// - jurisdiction: federal, state or county
/// - name: optional display name (e.g. Maryland)
/// - filing_status: S or MFJ (1 or 2 also accepted)
/// - max_income: upper limit of the bracket (empty for unlimited)
/// - rate: the marginal tax rate as a decimal (e.g., 0.10)
#[derive(Parser, Debug)]
#[command(name = "tax-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket tables
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let tables = BracketTableLoader::load_from_file(&args.file)
        .with_context(|| format!("Invalid bracket table: {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&tables, &mut out).context("failed to write summary")?;
    writeln!(out, "{} is valid.", args.file.display())?;
    Ok(())
}
