//! Loading bracket tables from CSV files.

mod loader;
mod summary;

pub use loader::{BracketTableLoader, BracketTableLoaderError, BracketTableRecord};
pub use summary::write_summary;
