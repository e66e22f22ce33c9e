//! Human-readable listing of a loaded table set.

use std::io::{self, Write};

use rust_decimal::Decimal;
use tax_core::{FilingStatusCode, Jurisdiction, TaxTables};

/// Writes one line per schedule (bracket count and top rate), the filing
/// statuses a jurisdiction leaves undefined, and the standard deductions.
pub fn write_summary<W: Write>(
    tables: &TaxTables,
    out: &mut W,
) -> io::Result<()> {
    for jurisdiction in Jurisdiction::ALL {
        let schedules = tables.jurisdiction(jurisdiction);
        writeln!(out, "{} ({})", schedules.name, jurisdiction)?;

        for status in FilingStatusCode::ALL {
            match schedules.schedule(status) {
                Ok(brackets) => {
                    let top = brackets.last().map(|b| b.rate).unwrap_or_default();
                    writeln!(
                        out,
                        "  {:<24} {} brackets, top rate {}%",
                        status.label(),
                        brackets.len(),
                        (top * Decimal::ONE_HUNDRED).normalize()
                    )?;
                }
                Err(_) => writeln!(out, "  {:<24} not defined", status.label())?,
            }
        }
    }

    writeln!(out, "Standard deductions")?;
    for deduction in tables.standard_deductions() {
        writeln!(
            out,
            "  {:<24} {}",
            deduction.filing_status.label(),
            deduction.amount
        )?;
    }
    Ok(())
}
