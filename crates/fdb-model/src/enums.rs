//! Type-safe enumerations for catalog records.
//!
//! These enums give compile-time safety to concepts the upstream foomatic-db
//! export represents as free-form strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical support level for a printer record.
///
/// The four tiers are ordered by support quality:
/// Perfect > Partial > Unknown > Unsupported (see [`SupportStatus::quality_rank`]).
/// Values serialize with the lowercase labels used in the published artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    /// Everything works (upstream functionality code `A`).
    Perfect,
    /// Works with limitations (upstream codes `B`/`C`, "good"/"partial"/"mostly").
    Partial,
    /// Rating missing or unrecognized, but drivers exist.
    Unknown,
    /// No driver support, or explicitly rated unsupported.
    Unsupported,
}

impl SupportStatus {
    /// Returns the canonical lowercase label as written to the artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportStatus::Perfect => "perfect",
            SupportStatus::Partial => "partial",
            SupportStatus::Unknown => "unknown",
            SupportStatus::Unsupported => "unsupported",
        }
    }

    /// Returns the support-quality rank; higher means better supported.
    pub fn quality_rank(&self) -> u8 {
        match self {
            SupportStatus::Perfect => 4,
            SupportStatus::Partial => 3,
            SupportStatus::Unknown => 2,
            SupportStatus::Unsupported => 1,
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SupportStatus {
    type Err = String;

    /// Parse a canonical status label (case-insensitive).
    ///
    /// This parses artifact labels only. Raw upstream functionality codes go
    /// through [`crate::status::classify_support`] instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "perfect" => Ok(SupportStatus::Perfect),
            "partial" => Ok(SupportStatus::Partial),
            "unknown" => Ok(SupportStatus::Unknown),
            "unsupported" => Ok(SupportStatus::Unsupported),
            _ => Err(format!("Unknown support status: {s}")),
        }
    }
}

/// Printing mechanism category derived from the upstream mechanism block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrinterType {
    Inkjet,
    Laser,
    DotMatrix,
    Unknown,
}

impl PrinterType {
    /// Returns the kebab-case label used in the published artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrinterType::Inkjet => "inkjet",
            PrinterType::Laser => "laser",
            PrinterType::DotMatrix => "dot-matrix",
            PrinterType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PrinterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrinterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inkjet" => Ok(PrinterType::Inkjet),
            "laser" => Ok(PrinterType::Laser),
            "dot-matrix" | "dotmatrix" => Ok(PrinterType::DotMatrix),
            "unknown" => Ok(PrinterType::Unknown),
            _ => Err(format!("Unknown printer type: {s}")),
        }
    }
}
