//! Progressive tax calculations.
//!
//! [`brackets`] holds the bracket engine; the remaining modules specialize it
//! per jurisdiction and combine the three jurisdictions into one liability.

pub mod brackets;
pub mod common;
pub mod comparison;
pub mod jurisdictions;
pub mod liability;

pub use brackets::{
    BracketCalculation, BracketCalculator, BracketTier, calculate_by_bracket, validate_brackets,
};
pub use comparison::{DeductionComparison, compare_deductions, compare_standard_deduction};
pub use jurisdictions::{
    calculate_county_tax, calculate_federal_tax, calculate_jurisdiction_tax, calculate_state_tax,
};
pub use liability::{JurisdictionTax, LiabilityReport, calculate_liability};
