use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::tables::default_standard_deductions;
use tax_core::{
    ConfigurationError, FilingStatusCode, Jurisdiction, JurisdictionSchedules, TaxBracket,
    TaxTables,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading bracket tables.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid jurisdiction '{value}' on line {line}")]
    InvalidJurisdiction { value: String, line: usize },

    #[error("invalid filing status '{value}' on line {line} (expected S, MFJ, 1 or 2)")]
    InvalidFilingStatus { value: String, line: usize },

    #[error("no brackets defined for the {0} jurisdiction")]
    MissingJurisdiction(Jurisdiction),

    #[error("invalid bracket table: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket table file.
///
/// - `jurisdiction`: `federal`, `state` or `county`
/// - `name`: optional display name for the jurisdiction (e.g. `Maryland`)
/// - `filing_status`: `S`, `MFJ`, `1` or `2`
/// - `max_income`: upper limit of the bracket; empty, `inf` or `unbounded`
///   for the top bracket
/// - `rate`: marginal rate as a decimal (e.g. `0.0475` for 4.75%)
///
/// Rows for one jurisdiction and filing status must appear in ascending order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketTableRecord {
    pub jurisdiction: String,
    #[serde(default)]
    pub name: Option<String>,
    pub filing_status: String,
    #[serde(deserialize_with = "deserialize_bracket_limit")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_bracket_limit<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(limit) if limit.eq_ignore_ascii_case("inf") || limit.eq_ignore_ascii_case("unbounded") => {
            Ok(None)
        }
        Some(limit) => limit
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Loader for bracket tables stored as CSV.
///
/// The loaded tables replace the built-in bracket schedules; standard
/// deductions stay at their built-in amounts.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketTableRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: BracketTableRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group parsed records into validated [`TaxTables`].
    ///
    /// Records are grouped by jurisdiction and filing status, keeping file
    /// order within each group. Every jurisdiction needs at least one row; a
    /// filing status may be left out, in which case calculations for it fail
    /// with a missing-schedule error. The first non-empty `name` seen for a
    /// jurisdiction becomes its display name.
    pub fn build(records: &[BracketTableRecord]) -> Result<TaxTables, BracketTableLoaderError> {
        let mut names: BTreeMap<Jurisdiction, String> = BTreeMap::new();
        let mut groups: BTreeMap<(Jurisdiction, FilingStatusCode), Vec<TaxBracket>> =
            BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let line = idx + 2; // line 1 is the header

            let jurisdiction = Jurisdiction::parse(&record.jurisdiction).ok_or_else(|| {
                BracketTableLoaderError::InvalidJurisdiction {
                    value: record.jurisdiction.clone(),
                    line,
                }
            })?;
            let filing_status = FilingStatusCode::parse(&record.filing_status).ok_or_else(|| {
                BracketTableLoaderError::InvalidFilingStatus {
                    value: record.filing_status.clone(),
                    line,
                }
            })?;

            if let Some(name) = record.name.as_deref().filter(|name| !name.is_empty()) {
                names
                    .entry(jurisdiction)
                    .or_insert_with(|| name.to_string());
            }

            groups
                .entry((jurisdiction, filing_status))
                .or_default()
                .push(TaxBracket {
                    max_income: record.max_income,
                    rate: record.rate,
                });
        }

        let mut schedules: BTreeMap<Jurisdiction, JurisdictionSchedules> = BTreeMap::new();
        for ((jurisdiction, filing_status), brackets) in groups {
            debug!(
                %jurisdiction,
                %filing_status,
                brackets = brackets.len(),
                "loaded bracket schedule"
            );
            schedules
                .entry(jurisdiction)
                .or_insert_with(|| {
                    let name = names
                        .remove(&jurisdiction)
                        .unwrap_or_else(|| jurisdiction.default_name().to_string());
                    JurisdictionSchedules::new(jurisdiction, name)
                })
                .insert(filing_status, brackets);
        }

        let mut take = |jurisdiction: Jurisdiction| {
            schedules
                .remove(&jurisdiction)
                .ok_or(BracketTableLoaderError::MissingJurisdiction(jurisdiction))
        };
        let federal = take(Jurisdiction::Federal)?;
        let state = take(Jurisdiction::State)?;
        let county = take(Jurisdiction::County)?;

        Ok(TaxTables::new(
            federal,
            state,
            county,
            default_standard_deductions(),
        )?)
    }

    /// Read, parse and build tables from a CSV file on disk.
    pub fn load_from_file(path: &Path) -> Result<TaxTables, BracketTableLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| BracketTableLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = Self::parse(file)?;
        let tables = Self::build(&records)?;

        info!(
            path = %path.display(),
            rows = records.len(),
            "loaded bracket tables"
        );
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const FLAT_CSV: &str = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,10000,0.10
federal,,S,,0.20
state,Ohio,S,,0.03
county,,S,,0.01
";

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_single_row() {
        let csv = "jurisdiction,name,filing_status,max_income,rate\nfederal,Federal,S,11925,0.10";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketTableRecord {
                jurisdiction: "federal".to_string(),
                name: Some("Federal".to_string()),
                filing_status: "S".to_string(),
                max_income: Some(dec!(11925)),
                rate: dec!(0.10),
            }]
        );
    }

    #[test]
    fn test_parse_unbounded_spellings() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,,0.37
federal,,S,inf,0.37
federal,,S,UNBOUNDED,0.37
";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.max_income.is_none()));
    }

    #[test]
    fn test_parse_name_column_is_optional() {
        let csv = "jurisdiction,filing_status,max_income,rate\ncounty,MFJ,75000,0.027";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].name, None);
        assert_eq!(records[0].max_income, Some(dec!(75000)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = "jurisdiction,name,filing_status,max_income,rate\n state , Maryland , MFJ , 1000 , 0.02 ";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].jurisdiction, "state");
        assert_eq!(records[0].name.as_deref(), Some("Maryland"));
        assert_eq!(records[0].rate, dec!(0.02));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "jurisdiction,filing_status\nfederal,S";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        let BracketTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_invalid_limit() {
        let csv = "jurisdiction,name,filing_status,max_income,rate\nfederal,,S,lots,0.10";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, BracketTableLoaderError::CsvParse(_)));
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn test_build_groups_by_jurisdiction_and_status() {
        let records = BracketTableLoader::parse(FLAT_CSV.as_bytes()).unwrap();

        let tables = BracketTableLoader::build(&records).expect("Should build");

        assert_eq!(
            tables
                .schedule(Jurisdiction::Federal, FilingStatusCode::Single)
                .unwrap(),
            &[
                TaxBracket::bounded(dec!(10000), dec!(0.10)),
                TaxBracket::unbounded(dec!(0.20)),
            ]
        );
        assert_eq!(tables.jurisdiction(Jurisdiction::State).name, "Ohio");
        assert_eq!(tables.jurisdiction(Jurisdiction::County).name, "County");
    }

    #[test]
    fn test_build_first_name_wins_even_if_default() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,,0.10
state,State,S,1000,0.02
state,Maryland,S,,0.03
county,,S,,0.01
county,Anne Arundel County,MFJ,,0.01
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let tables = BracketTableLoader::build(&records).unwrap();

        assert_eq!(tables.jurisdiction(Jurisdiction::State).name, "State");
        assert_eq!(
            tables.jurisdiction(Jurisdiction::County).name,
            "Anne Arundel County"
        );
        assert_eq!(tables.jurisdiction(Jurisdiction::Federal).name, "Federal");
    }

    #[test]
    fn test_build_error_message_names_file_line() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,X,,0.10
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        assert_eq!(
            err.to_string(),
            "invalid filing status 'X' on line 2 (expected S, MFJ, 1 or 2)"
        );
    }

    #[test]
    fn test_build_keeps_builtin_standard_deductions() {
        let records = BracketTableLoader::parse(FLAT_CSV.as_bytes()).unwrap();

        let tables = BracketTableLoader::build(&records).unwrap();

        assert_eq!(
            tables.standard_deduction(FilingStatusCode::MarriedFilingJointly),
            Ok(dec!(30000))
        );
    }

    #[test]
    fn test_build_missing_status_surfaces_at_lookup() {
        let records = BracketTableLoader::parse(FLAT_CSV.as_bytes()).unwrap();

        let tables = BracketTableLoader::build(&records).unwrap();

        assert_eq!(
            tables.schedule(Jurisdiction::County, FilingStatusCode::MarriedFilingJointly),
            Err(ConfigurationError::MissingSchedule {
                jurisdiction: Jurisdiction::County,
                filing_status: FilingStatusCode::MarriedFilingJointly,
            })
        );
    }

    #[test]
    fn test_build_missing_jurisdiction() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,,0.10
state,,S,,0.05
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        assert!(matches!(
            err,
            BracketTableLoaderError::MissingJurisdiction(Jurisdiction::County)
        ));
    }

    #[test]
    fn test_build_invalid_jurisdiction_reports_line() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,,0.10
city,,S,,0.01
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        match err {
            BracketTableLoaderError::InvalidJurisdiction { value, line } => {
                assert_eq!(value, "city");
                assert_eq!(line, 3);
            }
            other => panic!("expected InvalidJurisdiction, got {other:?}"),
        }
    }

    #[test]
    fn test_build_invalid_filing_status_reports_line() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,HOH,,0.10
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        match err {
            BracketTableLoaderError::InvalidFilingStatus { value, line } => {
                assert_eq!(value, "HOH");
                assert_eq!(line, 2);
            }
            other => panic!("expected InvalidFilingStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_schedule_without_top_bracket() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,10000,0.10
state,,S,,0.05
county,,S,,0.01
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        assert!(matches!(
            err,
            BracketTableLoaderError::Configuration(ConfigurationError::MissingTopBracket)
        ));
    }

    #[test]
    fn test_build_rejects_out_of_order_rows() {
        let csv = "\
jurisdiction,name,filing_status,max_income,rate
federal,,S,48475,0.12
federal,,S,11925,0.10
federal,,S,,0.37
state,,S,,0.05
county,,S,,0.01
";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        assert!(matches!(
            err,
            BracketTableLoaderError::Configuration(ConfigurationError::UnorderedBrackets {
                index: 1
            })
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = BracketTableLoader::load_from_file(Path::new("does/not/exist.csv"))
            .expect_err("Should fail");

        let BracketTableLoaderError::Io { path, .. } = err else {
            panic!("Expected Io error, got: {:?}", err);
        };
        assert_eq!(path, PathBuf::from("does/not/exist.csv"));
    }
}
