//! Plain-text rendering of a deduction comparison.
//!
//! Amounts are rounded half-up to cents here and nowhere else.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::calculations::{BracketTier, DeductionComparison, JurisdictionTax, LiabilityReport};

use crate::utils::{format_currency, format_percent, format_rate};

/// Printable report: the user's deduction in full, then a short summary of
/// the standard deduction.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    comparison: &'a DeductionComparison,
    breakdown: bool,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(comparison: &'a DeductionComparison) -> Self {
        Self {
            comparison,
            breakdown: true,
        }
    }

    /// Whether to list the bracket tiers of each jurisdiction.
    pub fn with_breakdown(
        mut self,
        breakdown: bool,
    ) -> Self {
        self.breakdown = breakdown;
        self
    }

    fn write_liability(
        &self,
        f: &mut fmt::Formatter<'_>,
        report: &LiabilityReport,
    ) -> fmt::Result {
        writeln!(f, "Filing Status: {}", report.filing_status.label())?;
        writeln!(f, "Total Income: {}", format_currency(report.income))?;
        writeln!(f, "Flat Deduction: {}", format_currency(report.deduction))?;
        writeln!(f, "Taxable Income: {}", format_currency(report.taxable_income))?;

        for jurisdiction in report.jurisdictions() {
            write_jurisdiction_summary(f, jurisdiction)?;
        }

        writeln!(
            f,
            "Total Taxes Owed: {} (Effective Tax Rate: {})",
            format_currency(report.total_tax),
            format_percent(report.effective_rate_percent)
        )?;
        writeln!(f, "Post-Tax Income: {}", format_currency(report.post_tax_income))?;
        writeln!(
            f,
            "Potential Spending Power: {}",
            format_currency(report.spending_power)
        )?;

        if self.breakdown {
            for jurisdiction in report.jurisdictions() {
                writeln!(f)?;
                writeln!(f, " --- {} Tax Brackets:", jurisdiction.name)?;
                for tier in &jurisdiction.calculation.tiers {
                    write_tier(f, tier)?;
                }
            }
        }
        Ok(())
    }

    fn write_standard_reference(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let standard = &self.comparison.standard;

        writeln!(f, "--- Quick Reference for Standard Deduction ---")?;
        writeln!(
            f,
            "Standard Deduction: {}",
            format_currency(self.comparison.standard_deduction)
        )?;
        writeln!(
            f,
            "Standard Total Taxes Owed: {}",
            format_currency(standard.total_tax)
        )?;
        writeln!(
            f,
            "Standard Post-Tax Income: {}",
            format_currency(standard.post_tax_income)
        )?;
        writeln!(
            f,
            "Standard Potential Spending Power: {}",
            format_currency(standard.spending_power)
        )?;

        let difference = self.comparison.tax_difference();
        if difference > Decimal::ZERO {
            writeln!(
                f,
                "The standard deduction saves {} in taxes.",
                format_currency(difference)
            )
        } else if difference < Decimal::ZERO {
            writeln!(
                f,
                "Your deduction saves {} in taxes.",
                format_currency(-difference)
            )
        } else {
            writeln!(f, "Both deductions owe the same tax.")
        }
    }
}

fn write_jurisdiction_summary(
    f: &mut fmt::Formatter<'_>,
    jurisdiction: &JurisdictionTax,
) -> fmt::Result {
    writeln!(
        f,
        "{} Taxes Owed: {} (Effective Tax Rate: {}, Marginal Rate: {})",
        jurisdiction.name,
        format_currency(jurisdiction.total_tax()),
        format_percent(jurisdiction.effective_rate_percent),
        format_rate(jurisdiction.marginal_rate())
    )
}

fn write_tier(
    f: &mut fmt::Formatter<'_>,
    tier: &BracketTier,
) -> fmt::Result {
    match tier.upper {
        Some(upper) => writeln!(
            f,
            "  Income from {} to {} taxed at {}: {}",
            format_currency(tier.lower),
            format_currency(upper),
            format_rate(tier.rate),
            format_currency(tier.tax)
        ),
        None => writeln!(
            f,
            "  Income from {} and above taxed at {}: {}",
            format_currency(tier.lower),
            format_rate(tier.rate),
            format_currency(tier.tax)
        ),
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "--- Using User-Provided Deduction ---")?;
        self.write_liability(f, &self.comparison.user)?;
        writeln!(f)?;
        self.write_standard_reference(f)
    }
}
