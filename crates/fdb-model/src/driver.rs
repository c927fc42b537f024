//! Driver record types: raw source records and the searchable index
//! projection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::refs::reference_entries;

/// On-disk wrapper for a single driver JSON file (`{ "driver": ... }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDocument {
    pub driver: RawDriver,
}

/// A driver record as exported from the upstream database, one per file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDriver {
    /// Namespaced source id (`driver/...`). Absent in malformed records.
    #[serde(rename = "@id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub supplier: Option<Value>,
    /// Some records carry the supplier under this legacy field instead.
    pub manufacturersupplied: Option<Value>,
    pub license: Option<Value>,
    pub url: Option<Value>,
    /// Possibly-localized free-text comments.
    pub comments: Option<Value>,
    /// Execution-command template, passed through untouched.
    pub execution: Option<Value>,
    /// Supported-printer reference list (`{ "printer": one-or-many }`).
    pub printers: Option<Value>,
}

impl RawDriver {
    /// The supplier field, falling back to the legacy variant.
    pub fn supplier_value(&self) -> Option<&Value> {
        self.supplier.as_ref().or(self.manufacturersupplied.as_ref())
    }

    /// The individual printer reference entries, however the list was shaped.
    pub fn printer_refs(&self) -> Vec<&Value> {
        reference_entries(self.printers.as_ref(), "printer")
    }

    /// Number of printers this driver declares support for.
    pub fn printer_count(&self) -> usize {
        self.printer_refs().len()
    }
}

/// Flat searchable projection of a driver record (`drivers.json` entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    pub id: String,
    pub name: String,
    pub supplier: Option<Value>,
    pub license: Option<Value>,
    /// Plain-text description flattened from the comment block.
    pub description: String,
    pub url: Option<Value>,
    pub printer_count: usize,
}
