//! Progressive bracket tax calculations for stacked federal, state and
//! county jurisdictions.

pub mod calculations;
pub mod error;
pub mod models;
pub mod tables;

pub use error::{ConfigurationError, InputError, TaxError};
pub use models::*;
pub use tables::{JurisdictionSchedules, TaxTables, default_tables};
