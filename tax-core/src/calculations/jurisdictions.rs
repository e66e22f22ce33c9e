//! Per-jurisdiction specializations of the bracket engine.
//!
//! Each function selects the jurisdiction's schedule for the filing status
//! and runs it through [`BracketCalculator`]. A missing schedule is a
//! configuration error.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::{BracketCalculation, BracketCalculator};
use crate::error::TaxError;
use crate::models::{FilingStatusCode, Jurisdiction};
use crate::tables::TaxTables;

/// Runs `taxable_income` through `jurisdiction`'s schedule for `filing_status`.
pub fn calculate_jurisdiction_tax(
    jurisdiction: Jurisdiction,
    taxable_income: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<BracketCalculation, TaxError> {
    let brackets = tables.schedule(jurisdiction, filing_status)?;
    let calculation = BracketCalculator::new(brackets).calculate(taxable_income)?;

    debug!(
        %jurisdiction,
        %filing_status,
        %taxable_income,
        total_tax = %calculation.total_tax,
        marginal_rate = %calculation.marginal_rate,
        tiers = calculation.tiers.len(),
        "bracket calculation"
    );

    Ok(calculation)
}

pub fn calculate_federal_tax(
    taxable_income: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<BracketCalculation, TaxError> {
    calculate_jurisdiction_tax(Jurisdiction::Federal, taxable_income, filing_status, tables)
}

pub fn calculate_state_tax(
    taxable_income: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<BracketCalculation, TaxError> {
    calculate_jurisdiction_tax(Jurisdiction::State, taxable_income, filing_status, tables)
}

pub fn calculate_county_tax(
    taxable_income: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<BracketCalculation, TaxError> {
    calculate_jurisdiction_tax(Jurisdiction::County, taxable_income, filing_status, tables)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;
    use crate::error::ConfigurationError;
    use crate::tables::{JurisdictionSchedules, default_standard_deductions, default_tables};

    fn tables() -> &'static TaxTables {
        default_tables().unwrap()
    }

    #[test]
    fn federal_single_fifty_thousand() {
        let result = calculate_federal_tax(dec!(50000), FilingStatusCode::Single, tables()).unwrap();

        assert_eq!(result.total_tax, dec!(5914.00));
        assert_eq!(result.marginal_rate, dec!(0.22));
    }

    #[test]
    fn federal_married_stays_in_second_bracket() {
        let result =
            calculate_federal_tax(dec!(50000), FilingStatusCode::MarriedFilingJointly, tables())
                .unwrap();

        // 23850 × 10% + 26150 × 12%
        assert_eq!(result.total_tax, dec!(5523.00));
        assert_eq!(result.marginal_rate, dec!(0.12));
    }

    #[test]
    fn state_single_fifty_thousand() {
        let result = calculate_state_tax(dec!(50000), FilingStatusCode::Single, tables()).unwrap();

        // 20 + 30 + 40 + 47000 × 4.75%
        assert_eq!(result.total_tax, dec!(2322.50));
        assert_eq!(result.marginal_rate, dec!(0.0475));
        assert_eq!(result.tiers.len(), 4);
    }

    #[test]
    fn county_single_fifty_thousand_is_on_boundary() {
        let result = calculate_county_tax(dec!(50000), FilingStatusCode::Single, tables()).unwrap();

        assert_eq!(result.total_tax, dec!(1350.000));
        assert_eq!(result.marginal_rate, dec!(0.027));
        assert_eq!(result.tiers.len(), 1);
    }

    #[test]
    fn county_married_high_income_reaches_top_bracket() {
        let result = calculate_county_tax(
            dec!(500000),
            FilingStatusCode::MarriedFilingJointly,
            tables(),
        )
        .unwrap();

        // 75000 × 2.7% + 405000 × 2.81% + 20000 × 3.2%
        assert_eq!(result.total_tax, dec!(14045.50));
        assert_eq!(result.marginal_rate, dec!(0.032));
    }

    #[test]
    fn missing_schedule_fails_without_fallback() {
        let single_only = |jurisdiction| {
            JurisdictionSchedules::new(jurisdiction, jurisdiction.default_name())
                .with_schedule(FilingStatusCode::Single, vec![TaxBracket::unbounded(dec!(0.1))])
        };
        let tables = TaxTables::new(
            single_only(Jurisdiction::Federal),
            single_only(Jurisdiction::State),
            single_only(Jurisdiction::County),
            default_standard_deductions(),
        )
        .unwrap();

        let result =
            calculate_state_tax(dec!(1000), FilingStatusCode::MarriedFilingJointly, &tables);

        assert_eq!(
            result,
            Err(TaxError::Configuration(ConfigurationError::MissingSchedule {
                jurisdiction: Jurisdiction::State,
                filing_status: FilingStatusCode::MarriedFilingJointly,
            }))
        );
    }
}
