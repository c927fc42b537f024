//! The printer/driver join.
//!
//! Builds the bidirectional printer-driver association from both sides'
//! declarations, synthesizes placeholder printers for driver-only references,
//! resolves driver details, derives type and status, and emits the sorted
//! consolidated collection. All join state lives in an owned [`JoinState`]
//! threaded through the phases; errors here abort the run (only XML ingest
//! has per-file fault isolation).

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use fdb_ingest::list_json_files;
use fdb_model::{
    CombinedPrinter, DRIVER_PREFIX, DriverDetail, DriverDocument, PRINTER_PREFIX, PrinterCatalog,
    PrinterDocument, RawDriver, RawPrinter, SupportStatus, classify_support, comment_text,
    ensure_prefix, mechanism_type, reference_comments, reference_entries, reference_id,
    split_printer_id, strip_namespace,
};

use crate::error::{CombineError, Result};

/// Accumulated join state: both record maps plus the association being built.
///
/// Keys are namespaced source ids. The association preserves first-seen order
/// per printer, which drives the recommended-driver fallback and the order of
/// embedded driver details.
#[derive(Debug, Default)]
pub struct JoinState {
    printers: BTreeMap<String, RawPrinter>,
    drivers: BTreeMap<String, RawDriver>,
    associations: BTreeMap<String, Vec<String>>,
}

impl JoinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a printer record and its own declared driver references.
    pub fn add_printer(&mut self, printer: RawPrinter) {
        let Some(printer_id) = printer.id.clone() else {
            warn!("skipping printer record with no id");
            return;
        };
        for entry in reference_entries(printer.drivers.as_ref(), "driver") {
            if let Some(driver_id) = reference_id(entry) {
                self.link(&printer_id, &ensure_prefix(driver_id, DRIVER_PREFIX));
            }
        }
        self.printers.insert(printer_id, printer);
    }

    /// Registers a driver record and walks its printer references, creating
    /// placeholder printers for ids never seen on the printer side.
    pub fn add_driver(&mut self, driver: RawDriver) {
        let Some(driver_id) = driver.id.clone() else {
            warn!("skipping driver record with no id");
            return;
        };

        let references: Vec<(String, Option<serde_json::Value>)> = driver
            .printer_refs()
            .into_iter()
            .filter_map(|entry| {
                reference_id(entry).map(|printer_id| {
                    (
                        ensure_prefix(printer_id, PRINTER_PREFIX),
                        reference_comments(entry).cloned(),
                    )
                })
            })
            .collect();
        self.drivers.insert(driver_id.clone(), driver);

        for (printer_id, comments) in references {
            self.link(&printer_id, &driver_id);
            if !self.printers.contains_key(&printer_id) {
                debug!(printer_id = %printer_id, driver_id = %driver_id, "synthesizing placeholder printer");
                self.printers
                    .insert(printer_id.clone(), synthesize_printer(&printer_id, comments));
            }
        }
    }

    /// Adds a driver to a printer's association set, ignoring duplicates.
    fn link(&mut self, printer_id: &str, driver_id: &str) {
        let associated = self.associations.entry(printer_id.to_string()).or_default();
        if !associated.iter().any(|existing| existing == driver_id) {
            associated.push(driver_id.to_string());
        }
    }

    /// Produces the sorted consolidated collection.
    pub fn into_combined(self) -> Vec<CombinedPrinter> {
        let mut combined = Vec::with_capacity(self.printers.len());

        for (printer_id, printer) in &self.printers {
            let mut associated = self
                .associations
                .get(printer_id)
                .cloned()
                .unwrap_or_default();

            // The declared recommended driver is always a member of its own
            // printer's supported set; otherwise fall back to the first
            // associated driver.
            let recommended = match printer.driver.as_deref() {
                Some(name) => {
                    let driver_id = ensure_prefix(name, DRIVER_PREFIX);
                    if !associated.iter().any(|existing| existing == &driver_id) {
                        associated.push(driver_id.clone());
                    }
                    Some(driver_id)
                }
                None => associated.first().cloned(),
            };

            // Unresolvable ids drop silently.
            let drivers: Vec<DriverDetail> = associated
                .iter()
                .filter_map(|driver_id| {
                    self.drivers.get(driver_id).map(|driver| DriverDetail {
                        id: driver_id.clone(),
                        name: driver.name.clone().unwrap_or_default(),
                        url: driver.url.clone(),
                        comments: comment_text(driver.comments.as_ref()),
                        execution: driver.execution.clone(),
                    })
                })
                .collect();

            let functionality = printer.functionality.clone();
            let mut status = classify_support(functionality.as_deref(), drivers.len());
            if status == SupportStatus::Unknown && drivers.is_empty() {
                status = SupportStatus::Unsupported;
            }

            combined.push(CombinedPrinter {
                id: strip_namespace(printer_id, PRINTER_PREFIX).to_string(),
                manufacturer: printer.make.clone().unwrap_or_default(),
                model: printer.model.clone().unwrap_or_default(),
                series: String::new(),
                connectivity: Vec::new(),
                recommended_driver: recommended,
                drivers,
                printer_type: mechanism_type(printer.mechanism.as_ref()),
                status,
                functionality,
                notes: comment_text(printer.comments.as_ref()),
            });
        }

        // Stable sort keeps input (id) order for ties.
        combined.sort_by(|a, b| {
            let manufacturer_order = a
                .manufacturer
                .to_lowercase()
                .cmp(&b.manufacturer.to_lowercase());
            manufacturer_order.then_with(|| a.model.to_lowercase().cmp(&b.model.to_lowercase()))
        });
        combined
    }
}

/// A minimal placeholder printer derived from a driver-side reference.
fn synthesize_printer(printer_id: &str, comments: Option<serde_json::Value>) -> RawPrinter {
    let (make, model) = split_printer_id(printer_id);
    RawPrinter {
        id: Some(printer_id.to_string()),
        make: Some(make),
        model: Some(model),
        mechanism: None,
        functionality: Some("?".to_string()),
        driver: None,
        comments,
        drivers: None,
    }
}

/// Loads all printer and driver JSON records and runs the join.
pub fn combine(printers_dir: &Path, drivers_dir: &Path) -> Result<Vec<CombinedPrinter>> {
    let mut state = JoinState::new();

    for path in list_json_files(printers_dir)? {
        let document: PrinterDocument = read_record(&path)?;
        state.add_printer(document.printer);
    }
    for path in list_json_files(drivers_dir)? {
        let document: DriverDocument = read_record(&path)?;
        state.add_driver(document.driver);
    }

    let combined = state.into_combined();
    info!(printers = combined.len(), "combined printer catalog built");
    Ok(combined)
}

fn read_record<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CombineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CombineError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes the consolidated collection as `{ "printers": [...] }`.
pub fn write_combined(path: &Path, printers: Vec<CombinedPrinter>) -> Result<()> {
    let catalog = PrinterCatalog { printers };
    let serialized = serde_json::to_string_pretty(&catalog).map_err(CombineError::Serialize)?;
    std::fs::write(path, serialized).map_err(|e| CombineError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), printers = catalog.printers.len(), "wrote combined catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdb_model::{PrinterSummary, PrinterType};
    use serde_json::json;

    fn printer(value: serde_json::Value) -> RawPrinter {
        serde_json::from_value(value).unwrap()
    }

    fn driver(value: serde_json::Value) -> RawDriver {
        serde_json::from_value(value).unwrap()
    }

    fn find<'a>(combined: &'a [CombinedPrinter], id: &str) -> &'a CombinedPrinter {
        combined.iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_join_completeness_both_directions() {
        let mut state = JoinState::new();
        // Printer declares d1; driver d2 declares the printer.
        state.add_printer(printer(json!({
            "@id": "printer/HP-LaserJet_4",
            "make": "HP",
            "model": "LaserJet 4",
            "functionality": "A",
            "drivers": { "driver": { "id": "driver/d1" } }
        })));
        state.add_driver(driver(json!({ "@id": "driver/d1", "name": "d1" })));
        state.add_driver(driver(json!({
            "@id": "driver/d2",
            "name": "d2",
            "printers": { "printer": [{ "id": "printer/HP-LaserJet_4" }] }
        })));

        let combined = state.into_combined();
        let record = find(&combined, "HP-LaserJet_4");
        let ids: Vec<_> = record.drivers.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["driver/d1", "driver/d2"]);
    }

    #[test]
    fn test_perfect_printer_with_two_drivers() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/HP-LaserJet_4",
            "make": "HP",
            "model": "LaserJet 4",
            "mechanism": { "laser": "" },
            "functionality": "A"
        })));
        state.add_driver(driver(json!({
            "@id": "driver/ljet4",
            "name": "ljet4",
            "printers": { "printer": [{ "id": "printer/HP-LaserJet_4" }] }
        })));
        state.add_driver(driver(json!({
            "@id": "driver/Postscript",
            "name": "Postscript",
            "printers": { "printer": [{ "id": "printer/HP-LaserJet_4" }] }
        })));

        let combined = state.into_combined();
        let record = find(&combined, "HP-LaserJet_4");
        assert_eq!(record.status, SupportStatus::Perfect);
        assert_eq!(record.printer_type, PrinterType::Laser);

        let summary = PrinterSummary::from(record);
        assert_eq!(summary.driver_count, 2);
        assert_eq!(summary.status, SupportStatus::Perfect);
    }

    #[test]
    fn test_placeholder_synthesis() {
        let mut state = JoinState::new();
        state.add_driver(driver(json!({
            "@id": "driver/foo2zjs-hpijs",
            "name": "foo2zjs-hpijs",
            "printers": { "printer": [{
                "id": "printer/HP-OfficeJet_G55",
                "comments": { "en": "host-based" }
            }] }
        })));

        let combined = state.into_combined();
        let record = find(&combined, "HP-OfficeJet_G55");
        assert_eq!(record.manufacturer, "HP");
        assert_eq!(record.model, "OfficeJet G55");
        assert_eq!(record.functionality.as_deref(), Some("?"));
        assert_eq!(record.notes, "host-based");
        // Unrated with one resolved driver lands in the Unknown tier.
        assert_eq!(record.drivers.len(), 1);
        assert_eq!(record.status, SupportStatus::Unknown);
    }

    #[test]
    fn test_declared_recommended_driver_is_a_member() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/HP-LaserJet_4",
            "make": "HP",
            "model": "LaserJet 4",
            "functionality": "A",
            "driver": "ljet4"
        })));
        state.add_driver(driver(json!({ "@id": "driver/ljet4", "name": "ljet4" })));

        let combined = state.into_combined();
        let record = find(&combined, "HP-LaserJet_4");
        assert_eq!(record.recommended_driver.as_deref(), Some("driver/ljet4"));
        assert!(record.drivers.iter().any(|d| d.id == "driver/ljet4"));
    }

    #[test]
    fn test_recommended_falls_back_to_first_association() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/Epson-Stylus",
            "make": "Epson",
            "model": "Stylus",
            "functionality": "B"
        })));
        state.add_driver(driver(json!({
            "@id": "driver/gutenprint",
            "name": "gutenprint",
            "printers": { "printer": [{ "id": "printer/Epson-Stylus" }] }
        })));
        state.add_driver(driver(json!({
            "@id": "driver/escputil",
            "name": "escputil",
            "printers": { "printer": [{ "id": "printer/Epson-Stylus" }] }
        })));

        let combined = state.into_combined();
        let record = find(&combined, "Epson-Stylus");
        assert_eq!(record.recommended_driver.as_deref(), Some("driver/gutenprint"));
    }

    #[test]
    fn test_no_drivers_means_no_recommended() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/Canon-BJC-1000",
            "make": "Canon",
            "model": "BJC-1000"
        })));

        let combined = state.into_combined();
        let record = find(&combined, "Canon-BJC-1000");
        assert_eq!(record.recommended_driver, None);
        assert!(record.drivers.is_empty());
        assert_eq!(record.status, SupportStatus::Unsupported);
    }

    #[test]
    fn test_unresolved_driver_ids_drop_silently() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/HP-DeskJet_500",
            "make": "HP",
            "model": "DeskJet 500",
            "functionality": "B",
            "drivers": { "driver": ["driver/ghost", "driver/real"] }
        })));
        state.add_driver(driver(json!({ "@id": "driver/real", "name": "real" })));

        let combined = state.into_combined();
        let record = find(&combined, "HP-DeskJet_500");
        let ids: Vec<_> = record.drivers.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["driver/real"]);
        // B stays partial regardless of the dropped reference.
        assert_eq!(record.status, SupportStatus::Partial);
    }

    #[test]
    fn test_unrated_with_unresolvable_association_downgrades() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/Generic-Unknown",
            "make": "Generic",
            "model": "Unknown",
            "drivers": { "driver": "driver/ghost" }
        })));

        let combined = state.into_combined();
        let record = find(&combined, "Generic-Unknown");
        assert!(record.drivers.is_empty());
        assert_eq!(record.status, SupportStatus::Unsupported);
    }

    #[test]
    fn test_unprefixed_references_are_namespaced() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/HP-DeskJet_500",
            "make": "HP",
            "model": "DeskJet 500",
            "drivers": { "driver": "hpijs" }
        })));
        state.add_driver(driver(json!({
            "@id": "driver/hpijs",
            "name": "hpijs",
            "printers": { "printer": "HP-DeskJet_500" }
        })));

        let combined = state.into_combined();
        assert_eq!(combined.len(), 1);
        let record = find(&combined, "HP-DeskJet_500");
        assert_eq!(record.drivers.len(), 1);
        assert_eq!(record.drivers[0].id, "driver/hpijs");
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut state = JoinState::new();
        for (id, make, model) in [
            ("printer/epson-z", "epson", "Z"),
            ("printer/HP-a", "HP", "a"),
            ("printer/Canon-m", "Canon", "m"),
            ("printer/HP-B", "HP", "B"),
        ] {
            state.add_printer(printer(json!({ "@id": id, "make": make, "model": model })));
        }

        let combined = state.into_combined();
        let order: Vec<_> = combined
            .iter()
            .map(|p| (p.manufacturer.as_str(), p.model.as_str()))
            .collect();
        // Lowercase makes interleave with uppercase ones; "epson" sorts
        // between "Canon" and "HP", not after them.
        assert_eq!(
            order,
            vec![("Canon", "m"), ("epson", "Z"), ("HP", "a"), ("HP", "B")]
        );
    }

    #[test]
    fn test_driver_detail_fields() {
        let mut state = JoinState::new();
        state.add_printer(printer(json!({
            "@id": "printer/HP-LaserJet_4",
            "make": "HP",
            "model": "LaserJet 4",
            "functionality": "A"
        })));
        state.add_driver(driver(json!({
            "@id": "driver/ljet4",
            "name": "ljet4",
            "url": "http://example.org/ljet4",
            "comments": { "en": "solid pcl driver" },
            "execution": { "prototype": "gs -q" },
            "printers": { "printer": [{ "id": "printer/HP-LaserJet_4" }] }
        })));

        let combined = state.into_combined();
        let record = find(&combined, "HP-LaserJet_4");
        let detail = &record.drivers[0];
        assert_eq!(detail.name, "ljet4");
        assert_eq!(detail.url, Some(json!("http://example.org/ljet4")));
        assert_eq!(detail.comments, "solid pcl driver");
        assert_eq!(detail.execution, Some(json!({ "prototype": "gs -q" })));
    }

    #[test]
    fn test_combine_from_disk_is_idempotent() {
        use tempfile::TempDir;

        let printers_dir = TempDir::new().unwrap();
        let drivers_dir = TempDir::new().unwrap();
        std::fs::write(
            printers_dir.path().join("HP-LaserJet_4.json"),
            serde_json::to_string_pretty(&json!({ "printer": {
                "@id": "printer/HP-LaserJet_4",
                "make": "HP",
                "model": "LaserJet 4",
                "mechanism": { "laser": "" },
                "functionality": "A"
            }}))
            .unwrap(),
        )
        .unwrap();
        std::fs::write(
            drivers_dir.path().join("ljet4.json"),
            serde_json::to_string_pretty(&json!({ "driver": {
                "@id": "driver/ljet4",
                "name": "ljet4",
                "printers": { "printer": [{ "id": "printer/HP-LaserJet_4" }] }
            }}))
            .unwrap(),
        )
        .unwrap();

        let first = combine(printers_dir.path(), drivers_dir.path()).unwrap();
        let second = combine(printers_dir.path(), drivers_dir.path()).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let output = TempDir::new().unwrap();
        let first_path = output.path().join("first.json");
        let second_path = output.path().join("second.json");
        write_combined(&first_path, first).unwrap();
        write_combined(&second_path, second).unwrap();
        assert_eq!(
            std::fs::read_to_string(&first_path).unwrap(),
            std::fs::read_to_string(&second_path).unwrap()
        );
    }
}
