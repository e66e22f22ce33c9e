//! Combined liability across the three stacked jurisdictions.
//!
//! | Value | Definition |
//! |-------|------------|
//! | Taxable income | `max(0, income - deduction)` |
//! | Jurisdiction tax | bracket engine on taxable income |
//! | Total tax | federal + state + county |
//! | Post-tax income | taxable income - total tax |
//! | Spending power | post-tax income + deduction |
//! | Effective rate | tax / taxable income × 100, or 0 when taxable income is 0 |
//!
//! The deduction is added back for spending power because it only reduces
//! taxable income; the money itself stays with the filer.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::FilingStatusCode;
//! use tax_core::calculations::calculate_liability;
//! use tax_core::tables::default_tables;
//!
//! let tables = default_tables().unwrap();
//! let report =
//!     calculate_liability(dec!(65000), dec!(15000), FilingStatusCode::Single, tables).unwrap();
//!
//! assert_eq!(report.taxable_income, dec!(50000));
//! assert_eq!(report.federal.total_tax(), dec!(5914.00));
//! assert_eq!(report.total_tax, dec!(9586.50));
//! assert_eq!(report.spending_power, dec!(55413.50));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::brackets::BracketCalculation;
use crate::calculations::common::{max, percent_of};
use crate::calculations::jurisdictions::{
    calculate_county_tax, calculate_federal_tax, calculate_state_tax,
};
use crate::error::{InputError, TaxError};
use crate::models::{FilingStatusCode, Jurisdiction};
use crate::tables::TaxTables;

/// Tax owed to one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionTax {
    pub jurisdiction: Jurisdiction,

    /// Display name from the tables, e.g. "Maryland".
    pub name: String,

    pub calculation: BracketCalculation,

    /// Tax as a percentage of taxable income.
    pub effective_rate_percent: Decimal,
}

impl JurisdictionTax {
    fn new(
        jurisdiction: Jurisdiction,
        tables: &TaxTables,
        calculation: BracketCalculation,
        taxable_income: Decimal,
    ) -> Self {
        Self {
            jurisdiction,
            name: tables.jurisdiction(jurisdiction).name.clone(),
            effective_rate_percent: calculation.effective_rate_percent(taxable_income),
            calculation,
        }
    }

    pub fn total_tax(&self) -> Decimal {
        self.calculation.total_tax
    }

    pub fn marginal_rate(&self) -> Decimal {
        self.calculation.marginal_rate
    }
}

/// Liability for one income, deduction and filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityReport {
    pub income: Decimal,
    pub deduction: Decimal,
    pub taxable_income: Decimal,
    pub filing_status: FilingStatusCode,

    pub federal: JurisdictionTax,
    pub state: JurisdictionTax,
    pub county: JurisdictionTax,

    pub total_tax: Decimal,

    /// Total tax as a percentage of taxable income.
    pub effective_rate_percent: Decimal,

    pub post_tax_income: Decimal,
    pub spending_power: Decimal,
}

impl LiabilityReport {
    /// Jurisdictions in reporting order (federal, state, county).
    pub fn jurisdictions(&self) -> [&JurisdictionTax; 3] {
        [&self.federal, &self.state, &self.county]
    }
}

/// Calculates tax owed to all three jurisdictions.
///
/// # Errors
///
/// - [`InputError`] if `income` or `deduction` is negative
/// - [`crate::ConfigurationError`] if a jurisdiction has no usable schedule
///   for `filing_status`
pub fn calculate_liability(
    income: Decimal,
    deduction: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<LiabilityReport, TaxError> {
    if income < Decimal::ZERO {
        return Err(InputError::NegativeIncome(income).into());
    }
    if deduction < Decimal::ZERO {
        return Err(InputError::NegativeDeduction(deduction).into());
    }

    let taxable_income = max(income - deduction, Decimal::ZERO);

    let federal = calculate_federal_tax(taxable_income, filing_status, tables)?;
    let state = calculate_state_tax(taxable_income, filing_status, tables)?;
    let county = calculate_county_tax(taxable_income, filing_status, tables)?;

    let total_tax = federal.total_tax + state.total_tax + county.total_tax;
    let post_tax_income = taxable_income - total_tax;
    let spending_power = post_tax_income + deduction;

    debug!(
        %income,
        %deduction,
        %taxable_income,
        %total_tax,
        "liability calculated"
    );

    Ok(LiabilityReport {
        income,
        deduction,
        taxable_income,
        filing_status,
        federal: JurisdictionTax::new(Jurisdiction::Federal, tables, federal, taxable_income),
        state: JurisdictionTax::new(Jurisdiction::State, tables, state, taxable_income),
        county: JurisdictionTax::new(Jurisdiction::County, tables, county, taxable_income),
        total_tax,
        effective_rate_percent: percent_of(total_tax, taxable_income),
        post_tax_income,
        spending_power,
    })
}
