//! Printer record types: raw source records, the combined join output, and
//! the summary projection served to the browsing client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{PrinterType, SupportStatus};
use crate::status::SupportSource;

/// On-disk wrapper for a single printer JSON file (`{ "printer": ... }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterDocument {
    pub printer: RawPrinter,
}

/// A printer record as exported from the upstream database, one per file.
///
/// Irregular blocks (mechanism, comments, the declared driver list) ride
/// through as raw JSON; accessors and the join interpret them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrinter {
    /// Namespaced source id (`printer/...`). Absent in malformed records.
    #[serde(rename = "@id")]
    pub id: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    /// Mechanism descriptor block; presence of child elements marks the type.
    pub mechanism: Option<Value>,
    /// Single-character quality rating (`A`/`B`/`C`), `?`, or absent.
    pub functionality: Option<String>,
    /// Preferred driver name, without the `driver/` namespace.
    pub driver: Option<String>,
    /// Possibly-localized free-text comments.
    pub comments: Option<Value>,
    /// The printer's own declared driver reference list.
    pub drivers: Option<Value>,
}

/// Derives the printer type from a raw mechanism block.
///
/// Indicator elements are checked in fixed priority (inkjet, laser,
/// dotmatrix), then the transfer-mode code `i` marks an inkjet. Anything else
/// is unknown.
pub fn mechanism_type(mechanism: Option<&Value>) -> PrinterType {
    let Some(Value::Object(fields)) = mechanism else {
        return PrinterType::Unknown;
    };
    if fields.contains_key("inkjet") {
        PrinterType::Inkjet
    } else if fields.contains_key("laser") {
        PrinterType::Laser
    } else if fields.contains_key("dotmatrix") {
        PrinterType::DotMatrix
    } else if fields.get("transfer").and_then(Value::as_str) == Some("i") {
        PrinterType::Inkjet
    } else {
        PrinterType::Unknown
    }
}

/// Resolved driver detail embedded in a combined printer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDetail {
    /// Namespaced driver id (`driver/...`).
    pub id: String,
    pub name: String,
    pub url: Option<Value>,
    /// Flattened plain-text comments.
    pub comments: String,
    /// Execution-command template, passed through untouched.
    pub execution: Option<Value>,
}

/// The join output: one consolidated record per printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPrinter {
    /// Source id with the `printer/` namespace stripped; names the shard file.
    pub id: String,
    pub manufacturer: String,
    pub model: String,
    /// Not available upstream; kept for artifact compatibility.
    pub series: String,
    /// Not available upstream; kept for artifact compatibility.
    pub connectivity: Vec<String>,
    /// Namespaced id of the designated driver, when one exists.
    pub recommended_driver: Option<String>,
    pub drivers: Vec<DriverDetail>,
    #[serde(rename = "type")]
    pub printer_type: PrinterType,
    pub status: SupportStatus,
    /// Raw upstream rating, retained for render-time reclassification.
    pub functionality: Option<String>,
    pub notes: String,
}

impl SupportSource for CombinedPrinter {
    fn functionality(&self) -> Option<&str> {
        self.functionality.as_deref()
    }

    fn driver_count(&self) -> usize {
        self.drivers.len()
    }
}

/// The consolidated collection artifact (`printers.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterCatalog {
    pub printers: Vec<CombinedPrinter>,
}

/// Reduced-field projection used for cheap bulk loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterSummary {
    pub id: String,
    pub manufacturer: String,
    pub model: String,
    #[serde(rename = "type")]
    pub printer_type: PrinterType,
    pub status: SupportStatus,
    pub functionality: Option<String>,
    pub driver_count: usize,
}

impl From<&CombinedPrinter> for PrinterSummary {
    fn from(printer: &CombinedPrinter) -> Self {
        Self {
            id: printer.id.clone(),
            manufacturer: printer.manufacturer.clone(),
            model: printer.model.clone(),
            printer_type: printer.printer_type,
            status: printer.status,
            functionality: printer.functionality.clone(),
            driver_count: printer.drivers.len(),
        }
    }
}

impl SupportSource for PrinterSummary {
    fn functionality(&self) -> Option<&str> {
        self.functionality.as_deref()
    }

    fn driver_count(&self) -> usize {
        self.driver_count
    }
}

/// The lightweight summary index artifact (`printersMap.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterIndex {
    pub printers: Vec<PrinterSummary>,
}
