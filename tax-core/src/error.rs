//! Error taxonomy for tax calculations.
//!
//! Errors fall into two groups:
//!
//! * [`ConfigurationError`] - the bracket tables themselves are unusable
//!   (empty, unordered, missing a top bracket, or missing for a filing
//!   status). These are fatal; a calculation never substitutes a default.
//! * [`InputError`] - the caller supplied a value the calculator does not
//!   accept, such as a negative income.
//!
//! [`TaxError`] wraps both so calculation entry points return one type.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FilingStatusCode, Jurisdiction};

/// The bracket tables cannot be used for a calculation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A bracket schedule contains no brackets.
    #[error("bracket schedule is empty")]
    EmptySchedule,

    /// The last bracket has an upper limit, so high incomes fall off the table.
    #[error("bracket schedule has no unbounded top bracket")]
    MissingTopBracket,

    /// An unbounded bracket appears before the end of the schedule.
    #[error("unbounded bracket at position {index} is not the last bracket")]
    UnboundedBracketNotLast { index: usize },

    /// Upper limits must be positive and strictly increasing.
    #[error("bracket at position {index} does not raise the upper limit")]
    UnorderedBrackets { index: usize },

    /// A rate outside `0..=1`.
    #[error("bracket at position {index} has invalid rate {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    /// No schedule is defined for the filing status in this jurisdiction.
    #[error("no {jurisdiction} bracket schedule for filing status {filing_status}")]
    MissingSchedule {
        jurisdiction: Jurisdiction,
        filing_status: FilingStatusCode,
    },

    /// No standard deduction is defined for the filing status.
    #[error("no standard deduction for filing status {0}")]
    MissingStandardDeduction(FilingStatusCode),

    /// A raw filing status code that maps to no known status.
    #[error("unknown filing status code {0}")]
    UnknownFilingStatus(i32),
}

/// A caller-supplied value was rejected before reaching the bracket engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("deduction must be non-negative, got {0}")]
    NegativeDeduction(Decimal),
}

/// Any failure of a tax calculation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

impl TaxError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
