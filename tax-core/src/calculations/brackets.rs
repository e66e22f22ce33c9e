//! Progressive bracket engine.
//!
//! A bracket schedule is an ordered list of [`TaxBracket`]s. Income is
//! apportioned across the brackets from the bottom up: every bracket below the
//! one containing the income is taxed over its full width, and the containing
//! bracket is taxed on the remainder.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Start with zero tax and a lower bound of zero |
//! | 2    | If income is at or below the bracket's limit, tax the remainder and stop |
//! | 3    | Otherwise tax the full bracket width and raise the lower bound |
//! | 4    | Running out of brackets is a configuration error |
//!
//! Income exactly on a limit belongs to the lower bracket.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::BracketCalculator;
//!
//! let brackets = vec![
//!     TaxBracket::bounded(dec!(10000), dec!(0.10)),
//!     TaxBracket::unbounded(dec!(0.20)),
//! ];
//!
//! let result = BracketCalculator::new(&brackets).calculate(dec!(15000)).unwrap();
//!
//! assert_eq!(result.total_tax, dec!(2000));
//! assert_eq!(result.marginal_rate, dec!(0.20));
//! assert_eq!(result.tiers.len(), 2);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;
use crate::calculations::common::percent_of;
use crate::error::{ConfigurationError, InputError, TaxError};

/// Tax owed on one bracket the income reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTier {
    /// Lower bound of the bracket (the previous bracket's limit, or zero).
    pub lower: Decimal,

    /// Upper limit of the bracket. `None` for the top bracket.
    pub upper: Option<Decimal>,

    pub rate: Decimal,

    /// Portion of the income that fell into this bracket.
    pub income_taxed: Decimal,

    /// `income_taxed × rate`, unrounded.
    pub tax: Decimal,
}

/// Result of running one income through one bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketCalculation {
    /// Rate of the bracket the income falls into.
    pub marginal_rate: Decimal,

    /// Sum of the tier amounts, unrounded.
    pub total_tax: Decimal,

    /// Brackets reached by the income, lowest first.
    pub tiers: Vec<BracketTier>,
}

impl BracketCalculation {
    /// Total tax as a percentage of `income`; zero for zero income.
    pub fn effective_rate_percent(
        &self,
        income: Decimal,
    ) -> Decimal {
        percent_of(self.total_tax, income)
    }

    /// Sum of the income apportioned across the tiers. Always equals the
    /// income the calculation was run with.
    pub fn income_taxed(&self) -> Decimal {
        self.tiers.iter().map(|tier| tier.income_taxed).sum()
    }
}

/// Calculator over a borrowed bracket schedule.
#[derive(Debug, Clone)]
pub struct BracketCalculator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketCalculator<'a> {
    /// Creates a calculator for `brackets`.
    ///
    /// Brackets should be sorted by `max_income` in ascending order with an
    /// unbounded last bracket; see [`validate_brackets`].
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Apportions `income` across the schedule.
    ///
    /// # Errors
    ///
    /// - [`InputError::NegativeIncome`] if `income` is below zero
    /// - [`ConfigurationError::EmptySchedule`] if there are no brackets
    /// - [`ConfigurationError::MissingTopBracket`] if the income is above the
    ///   last bracket's limit
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Result<BracketCalculation, TaxError> {
        if income < Decimal::ZERO {
            return Err(InputError::NegativeIncome(income).into());
        }
        if self.brackets.is_empty() {
            return Err(ConfigurationError::EmptySchedule.into());
        }

        let mut total_tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;
        let mut tiers = Vec::with_capacity(self.brackets.len());

        for bracket in self.brackets {
            if bracket.contains(income) {
                let income_taxed = income - lower;
                let tax = income_taxed * bracket.rate;
                total_tax += tax;
                tiers.push(BracketTier {
                    lower,
                    upper: bracket.max_income,
                    rate: bracket.rate,
                    income_taxed,
                    tax,
                });
                return Ok(BracketCalculation {
                    marginal_rate: bracket.rate,
                    total_tax,
                    tiers,
                });
            }

            // Not containing the income means the bracket is bounded.
            if let Some(upper) = bracket.max_income {
                let income_taxed = upper - lower;
                let tax = income_taxed * bracket.rate;
                total_tax += tax;
                tiers.push(BracketTier {
                    lower,
                    upper: Some(upper),
                    rate: bracket.rate,
                    income_taxed,
                    tax,
                });
                lower = upper;
            }
        }

        Err(ConfigurationError::MissingTopBracket.into())
    }
}

/// Convenience wrapper around [`BracketCalculator`].
pub fn calculate_by_bracket(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Result<BracketCalculation, TaxError> {
    BracketCalculator::new(brackets).calculate(income)
}

/// Checks that a schedule can be used by [`BracketCalculator`].
///
/// A valid schedule is non-empty, has rates in `0..=1`, has positive and
/// strictly increasing limits, and ends with exactly one unbounded bracket.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), ConfigurationError> {
    let Some(last_index) = brackets.len().checked_sub(1) else {
        return Err(ConfigurationError::EmptySchedule);
    };

    let mut previous = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(ConfigurationError::InvalidRate {
                index,
                rate: bracket.rate,
            });
        }
        match bracket.max_income {
            Some(max) if max <= previous => {
                return Err(ConfigurationError::UnorderedBrackets { index });
            }
            Some(max) => previous = max,
            None if index != last_index => {
                return Err(ConfigurationError::UnboundedBracketNotLast { index });
            }
            None => {}
        }
    }

    if brackets[last_index].max_income.is_some() {
        return Err(ConfigurationError::MissingTopBracket);
    }
    Ok(())
}
