use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Filing statuses with bracket schedules.
///
/// The numeric ids follow the terminal menu: 1 = single, 2 = married filing
/// jointly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilingStatusCode {
    Single,
    MarriedFilingJointly,
}

impl FilingStatusCode {
    pub const ALL: [FilingStatusCode; 2] = [Self::Single, Self::MarriedFilingJointly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Self::Single => 1,
            Self::MarriedFilingJointly => 2,
        }
    }

    /// Maps a raw menu id to a status. Any id other than 1 or 2 is a
    /// configuration error; there is no fallback status.
    pub fn from_id(id: i32) -> Result<Self, ConfigurationError> {
        match id {
            1 => Ok(Self::Single),
            2 => Ok(Self::MarriedFilingJointly),
            other => Err(ConfigurationError::UnknownFilingStatus(other)),
        }
    }

    /// Parses a status code (`S`, `MFJ`) or a menu id (`1`, `2`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "S" | "1" => Some(Self::Single),
            "MFJ" | "2" => Some(Self::MarriedFilingJointly),
            _ => None,
        }
    }
}

impl fmt::Display for FilingStatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
