use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;

use tax_cli::app::{self, FilingStatusArg, Inputs};
use tax_cli::logging::init_logging;
use tax_cli::prompt::Prompter;
use tax_cli::report::ComparisonReport;
use tax_cli::utils::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive bracket tax calculator for federal, state and county income
/// tax.
///
/// Compares a flat deduction against the standard deduction. Values not
/// given as options are asked for interactively.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Total income, e.g. 65000 or 65,000.
    #[arg(long, value_parser = parse_amount)]
    income: Option<Decimal>,

    /// Filing status: single (1) or married filing jointly (2).
    #[arg(long, value_enum)]
    filing_status: Option<FilingStatusArg>,

    /// Flat deduction to compare against the standard deduction.
    #[arg(long, value_parser = parse_amount)]
    deduction: Option<Decimal>,

    /// CSV file with bracket tables to use instead of the built-in 2025 tables.
    #[arg(long, value_name = "CSV")]
    brackets: Option<PathBuf>,

    /// Append log output to this file as well as stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Omit the per-bracket breakdown.
    #[arg(long)]
    no_breakdown: bool,
}

fn parse_amount(s: &str) -> Result<Decimal, String> {
    let amount = parse_decimal(s).map_err(|e| e.to_string())?;
    if amount < Decimal::ZERO {
        return Err("amount must not be negative".to_string());
    }
    Ok(amount)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let tables = app::load_tables(cli.brackets.as_deref())?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let income = match cli.income {
        Some(income) => income,
        None => prompter
            .amount("Enter your total income: ")
            .context("failed to read income")?,
    };
    let filing_status = match cli.filing_status {
        Some(status) => status.into(),
        None => prompter
            .filing_status()
            .context("failed to read filing status")?,
    };
    let deduction = match cli.deduction {
        Some(deduction) => deduction,
        None => prompter
            .amount("Enter your flat deduction amount: ")
            .context("failed to read deduction")?,
    };

    let inputs = Inputs {
        income,
        filing_status,
        deduction,
    };
    debug!(?inputs, "inputs collected");

    let comparison = app::run(&inputs, &tables).context("tax calculation failed")?;

    println!();
    print!(
        "{}",
        ComparisonReport::new(&comparison).with_breakdown(!cli.no_breakdown)
    );

    Ok(())
}
