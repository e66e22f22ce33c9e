mod filing_status;
mod jurisdiction;
mod standard_deduction;
mod tax_bracket;

pub use filing_status::FilingStatusCode;
pub use jurisdiction::Jurisdiction;
pub use standard_deduction::StandardDeduction;
pub use tax_bracket::TaxBracket;
