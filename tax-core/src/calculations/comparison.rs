//! Comparison of a user-supplied deduction against the standard deduction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::liability::{LiabilityReport, calculate_liability};
use crate::error::TaxError;
use crate::models::FilingStatusCode;
use crate::tables::TaxTables;

/// Liability under the user's deduction next to liability under the standard
/// deduction for the same income and filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionComparison {
    pub user: LiabilityReport,
    pub standard: LiabilityReport,
    pub standard_deduction: Decimal,
}

impl DeductionComparison {
    /// Total tax under the user's deduction minus total tax under the standard
    /// deduction. Positive when the standard deduction owes less.
    pub fn tax_difference(&self) -> Decimal {
        self.user.total_tax - self.standard.total_tax
    }

    pub fn standard_is_better(&self) -> bool {
        self.standard.total_tax < self.user.total_tax
    }

    /// The report with the lower total tax; the user's report on a tie.
    pub fn preferred(&self) -> &LiabilityReport {
        if self.standard_is_better() {
            &self.standard
        } else {
            &self.user
        }
    }
}

/// Calculates liability using the standard deduction for `filing_status`
/// ($15,000 single, $30,000 married filing jointly in the built-in tables).
///
/// # Errors
///
/// [`crate::ConfigurationError::MissingStandardDeduction`] if the tables have
/// no standard deduction for the status, plus anything
/// [`calculate_liability`] returns.
pub fn compare_standard_deduction(
    income: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<LiabilityReport, TaxError> {
    let standard_deduction = tables.standard_deduction(filing_status)?;
    calculate_liability(income, standard_deduction, filing_status, tables)
}

/// Runs the user's deduction and the standard deduction side by side.
pub fn compare_deductions(
    income: Decimal,
    user_deduction: Decimal,
    filing_status: FilingStatusCode,
    tables: &TaxTables,
) -> Result<DeductionComparison, TaxError> {
    let user = calculate_liability(income, user_deduction, filing_status, tables)?;
    let standard = compare_standard_deduction(income, filing_status, tables)?;

    Ok(DeductionComparison {
        standard_deduction: standard.deduction,
        user,
        standard,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::error::ConfigurationError;
    use crate::tables::default_tables;

    fn tables() -> &'static TaxTables {
        default_tables().unwrap()
    }

    // =========================================================================
    // compare_standard_deduction tests
    // =========================================================================

    #[test]
    fn standard_deduction_single_is_fifteen_thousand() {
        let report =
            compare_standard_deduction(dec!(65000), FilingStatusCode::Single, tables()).unwrap();

        assert_eq!(report.deduction, dec!(15000));
        assert_eq!(report.taxable_income, dec!(50000));
    }

    #[test]
    fn standard_deduction_married_is_thirty_thousand() {
        let report = compare_standard_deduction(
            dec!(130000),
            FilingStatusCode::MarriedFilingJointly,
            tables(),
        )
        .unwrap();

        assert_eq!(report.deduction, dec!(30000));
        assert_eq!(report.taxable_income, dec!(100000));
    }

    #[test]
    fn standard_deduction_unknown_status_fails_fast() {
        let result = FilingStatusCode::from_id(3)
            .map_err(TaxError::from)
            .and_then(|status| compare_standard_deduction(dec!(65000), status, tables()));

        assert_eq!(
            result,
            Err(TaxError::Configuration(
                ConfigurationError::UnknownFilingStatus(3)
            ))
        );
    }

    // =========================================================================
    // compare_deductions tests
    // =========================================================================

    #[test]
    fn compare_prefers_larger_deduction() {
        let comparison =
            compare_deductions(dec!(65000), dec!(5000), FilingStatusCode::Single, tables())
                .unwrap();

        assert_eq!(comparison.standard_deduction, dec!(15000));
        assert_eq!(comparison.user.deduction, dec!(5000));
        assert!(comparison.standard_is_better());
        assert!(comparison.tax_difference() > Decimal::ZERO);
        assert_eq!(comparison.preferred(), &comparison.standard);
    }

    #[test]
    fn compare_keeps_user_report_on_tie() {
        let comparison =
            compare_deductions(dec!(65000), dec!(15000), FilingStatusCode::Single, tables())
                .unwrap();

        assert_eq!(comparison.tax_difference(), Decimal::ZERO);
        assert!(!comparison.standard_is_better());
        assert_eq!(comparison.preferred(), &comparison.user);
    }

    #[test]
    fn compare_itemized_above_standard_wins() {
        let comparison = compare_deductions(
            dec!(200000),
            dec!(45000),
            FilingStatusCode::MarriedFilingJointly,
            tables(),
        )
        .unwrap();

        assert!(!comparison.standard_is_better());
        assert!(comparison.tax_difference() < Decimal::ZERO);
        assert_eq!(comparison.preferred().deduction, dec!(45000));
    }

    #[test]
    fn compare_propagates_invalid_input() {
        let result =
            compare_deductions(dec!(65000), dec!(-1), FilingStatusCode::Single, tables());

        assert!(result.unwrap_err().is_invalid_input());
    }
}
