//! Glue between the command line and the calculation engine.

use std::borrow::Cow;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use rust_decimal::Decimal;
use tax_core::calculations::{DeductionComparison, compare_deductions};
use tax_core::{FilingStatusCode, TaxError, TaxTables, default_tables};
use tax_data::BracketTableLoader;
use tracing::info;

/// Filing status as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilingStatusArg {
    #[value(alias = "1", alias = "s")]
    Single,
    #[value(alias = "2", alias = "mfj")]
    Married,
}

impl From<FilingStatusArg> for FilingStatusCode {
    fn from(arg: FilingStatusArg) -> Self {
        match arg {
            FilingStatusArg::Single => FilingStatusCode::Single,
            FilingStatusArg::Married => FilingStatusCode::MarriedFilingJointly,
        }
    }
}

/// One scenario to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inputs {
    pub income: Decimal,
    pub filing_status: FilingStatusCode,
    pub deduction: Decimal,
}

/// Loads bracket tables from `path`, or the built-in 2025 tables when no
/// path is given.
pub fn load_tables(path: Option<&Path>) -> anyhow::Result<Cow<'static, TaxTables>> {
    match path {
        Some(path) => {
            let tables = BracketTableLoader::load_from_file(path)
                .with_context(|| format!("failed to load bracket tables from {}", path.display()))?;
            Ok(Cow::Owned(tables))
        }
        None => {
            let tables = default_tables().context("built-in bracket tables are invalid")?;
            Ok(Cow::Borrowed(tables))
        }
    }
}

/// Evaluates the user's deduction alongside the standard deduction.
pub fn run(
    inputs: &Inputs,
    tables: &TaxTables,
) -> Result<DeductionComparison, TaxError> {
    info!(
        income = %inputs.income,
        filing_status = %inputs.filing_status,
        deduction = %inputs.deduction,
        "calculating liability"
    );

    let comparison = compare_deductions(
        inputs.income,
        inputs.deduction,
        inputs.filing_status,
        tables,
    )?;

    info!(
        user_total = %comparison.user.total_tax,
        standard_total = %comparison.standard.total_tax,
        "calculation complete"
    );

    Ok(comparison)
}
