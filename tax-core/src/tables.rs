//! Bracket tables for the three jurisdictions.
//!
//! [`TaxTables`] is validated when it is built and never mutated afterwards.
//! The built-in 2025 tables (federal, Maryland, Anne Arundel County) are
//! constructed once per process by [`default_tables`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::calculations::validate_brackets;
use crate::error::ConfigurationError;
use crate::models::{FilingStatusCode, Jurisdiction, StandardDeduction, TaxBracket};

/// Bracket schedules of one jurisdiction, keyed by filing status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionSchedules {
    pub jurisdiction: Jurisdiction,
    pub name: String,
    schedules: BTreeMap<FilingStatusCode, Vec<TaxBracket>>,
}

impl JurisdictionSchedules {
    pub fn new(
        jurisdiction: Jurisdiction,
        name: impl Into<String>,
    ) -> Self {
        Self {
            jurisdiction,
            name: name.into(),
            schedules: BTreeMap::new(),
        }
    }

    pub fn with_schedule(
        mut self,
        filing_status: FilingStatusCode,
        brackets: Vec<TaxBracket>,
    ) -> Self {
        self.insert(filing_status, brackets);
        self
    }

    /// Adds or replaces the schedule for `filing_status`.
    pub fn insert(
        &mut self,
        filing_status: FilingStatusCode,
        brackets: Vec<TaxBracket>,
    ) {
        self.schedules.insert(filing_status, brackets);
    }

    /// Looks up the schedule for `filing_status`.
    ///
    /// A status without a schedule is a [`ConfigurationError::MissingSchedule`];
    /// no other status's schedule is substituted.
    pub fn schedule(
        &self,
        filing_status: FilingStatusCode,
    ) -> Result<&[TaxBracket], ConfigurationError> {
        self.schedules
            .get(&filing_status)
            .map(Vec::as_slice)
            .ok_or(ConfigurationError::MissingSchedule {
                jurisdiction: self.jurisdiction,
                filing_status,
            })
    }

    /// Validates every schedule; see [`validate_brackets`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (filing_status, brackets) in &self.schedules {
            validate_brackets(brackets).inspect_err(|error| {
                warn!(
                    jurisdiction = %self.jurisdiction,
                    %filing_status,
                    %error,
                    "invalid bracket schedule"
                );
            })?;
        }
        Ok(())
    }
}

/// Validated bracket schedules for all three jurisdictions plus the
/// standard deduction per filing status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTables {
    federal: JurisdictionSchedules,
    state: JurisdictionSchedules,
    county: JurisdictionSchedules,
    standard_deductions: Vec<StandardDeduction>,
}

impl TaxTables {
    /// Builds a table set, validating every schedule.
    pub fn new(
        federal: JurisdictionSchedules,
        state: JurisdictionSchedules,
        county: JurisdictionSchedules,
        standard_deductions: Vec<StandardDeduction>,
    ) -> Result<Self, ConfigurationError> {
        federal.validate()?;
        state.validate()?;
        county.validate()?;

        Ok(Self {
            federal,
            state,
            county,
            standard_deductions,
        })
    }

    pub fn jurisdiction(
        &self,
        jurisdiction: Jurisdiction,
    ) -> &JurisdictionSchedules {
        match jurisdiction {
            Jurisdiction::Federal => &self.federal,
            Jurisdiction::State => &self.state,
            Jurisdiction::County => &self.county,
        }
    }

    pub fn schedule(
        &self,
        jurisdiction: Jurisdiction,
        filing_status: FilingStatusCode,
    ) -> Result<&[TaxBracket], ConfigurationError> {
        self.jurisdiction(jurisdiction).schedule(filing_status)
    }

    pub fn standard_deduction(
        &self,
        filing_status: FilingStatusCode,
    ) -> Result<Decimal, ConfigurationError> {
        self.standard_deductions
            .iter()
            .find(|deduction| deduction.filing_status == filing_status)
            .map(|deduction| deduction.amount)
            .ok_or(ConfigurationError::MissingStandardDeduction(filing_status))
    }

    pub fn standard_deductions(&self) -> &[StandardDeduction] {
        &self.standard_deductions
    }
}

static DEFAULT_TABLES: LazyLock<Result<TaxTables, ConfigurationError>> =
    LazyLock::new(builtin_tables);

/// The built-in 2025 tables, built on first use and shared for the life of
/// the process.
pub fn default_tables() -> Result<&'static TaxTables, ConfigurationError> {
    DEFAULT_TABLES.as_ref().map_err(Clone::clone)
}

/// Standard deductions used by the built-in tables: $15,000 single and
/// $30,000 married filing jointly.
pub fn default_standard_deductions() -> Vec<StandardDeduction> {
    vec![
        StandardDeduction {
            filing_status: FilingStatusCode::Single,
            amount: dec!(15000),
        },
        StandardDeduction {
            filing_status: FilingStatusCode::MarriedFilingJointly,
            amount: dec!(30000),
        },
    ]
}

fn schedule(
    bounded: &[(Decimal, Decimal)],
    top_rate: Decimal,
) -> Vec<TaxBracket> {
    bounded
        .iter()
        .map(|&(max_income, rate)| TaxBracket::bounded(max_income, rate))
        .chain(std::iter::once(TaxBracket::unbounded(top_rate)))
        .collect()
}

fn builtin_tables() -> Result<TaxTables, ConfigurationError> {
    let federal = JurisdictionSchedules::new(Jurisdiction::Federal, "Federal")
        .with_schedule(
            FilingStatusCode::Single,
            schedule(
                &[
                    (dec!(11925), dec!(0.10)),
                    (dec!(48475), dec!(0.12)),
                    (dec!(103350), dec!(0.22)),
                    (dec!(197300), dec!(0.24)),
                    (dec!(250525), dec!(0.32)),
                    (dec!(626350), dec!(0.35)),
                ],
                dec!(0.37),
            ),
        )
        .with_schedule(
            FilingStatusCode::MarriedFilingJointly,
            schedule(
                &[
                    (dec!(23850), dec!(0.10)),
                    (dec!(96950), dec!(0.12)),
                    (dec!(206700), dec!(0.22)),
                    (dec!(394600), dec!(0.24)),
                    (dec!(501050), dec!(0.32)),
                    (dec!(751600), dec!(0.35)),
                ],
                dec!(0.37),
            ),
        );

    let state = JurisdictionSchedules::new(Jurisdiction::State, "Maryland")
        .with_schedule(
            FilingStatusCode::Single,
            schedule(
                &[
                    (dec!(1000), dec!(0.02)),
                    (dec!(2000), dec!(0.03)),
                    (dec!(3000), dec!(0.04)),
                    (dec!(100000), dec!(0.0475)),
                    (dec!(125000), dec!(0.05)),
                    (dec!(150000), dec!(0.0525)),
                    (dec!(250000), dec!(0.055)),
                ],
                dec!(0.0575),
            ),
        )
        .with_schedule(
            FilingStatusCode::MarriedFilingJointly,
            schedule(
                &[
                    (dec!(1000), dec!(0.02)),
                    (dec!(2000), dec!(0.03)),
                    (dec!(3000), dec!(0.04)),
                    (dec!(150000), dec!(0.0475)),
                    (dec!(175000), dec!(0.05)),
                    (dec!(225000), dec!(0.0525)),
                    (dec!(300000), dec!(0.055)),
                ],
                dec!(0.0575),
            ),
        );

    let county = JurisdictionSchedules::new(Jurisdiction::County, "Anne Arundel County")
        .with_schedule(
            FilingStatusCode::Single,
            schedule(
                &[(dec!(50000), dec!(0.027)), (dec!(400000), dec!(0.0281))],
                dec!(0.032),
            ),
        )
        .with_schedule(
            FilingStatusCode::MarriedFilingJointly,
            schedule(
                &[(dec!(75000), dec!(0.027)), (dec!(480000), dec!(0.0281))],
                dec!(0.032),
            ),
        );

    TaxTables::new(federal, state, county, default_standard_deductions())
}
