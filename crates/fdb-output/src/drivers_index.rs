//! The flat searchable drivers index.
//!
//! Projects every driver JSON record into a [`DriverSummary`] independently of
//! the join. Records missing an id, or files that fail to parse, are logged
//! and skipped; this stage never aborts on a single bad record.

use std::path::Path;

use tracing::{info, warn};

use fdb_ingest::list_json_files;
use fdb_model::{DriverDocument, DriverSummary, comment_text};

use crate::error::{OutputError, Result};

/// Builds the driver index from a directory of driver JSON files.
///
/// Output is sorted by name, case-insensitive; empty names sort first.
pub fn build_driver_index(drivers_dir: &Path) -> Result<Vec<DriverSummary>> {
    let mut summaries = Vec::new();

    for path in list_json_files(drivers_dir)? {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable driver record");
                continue;
            }
        };
        let document: DriverDocument = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping invalid driver record");
                continue;
            }
        };

        let driver = document.driver;
        let Some(id) = driver.id.clone() else {
            warn!(path = %path.display(), "skipping driver record with no id");
            continue;
        };

        summaries.push(DriverSummary {
            id,
            name: driver.name.clone().unwrap_or_default(),
            supplier: driver.supplier_value().cloned(),
            license: driver.license.clone(),
            description: comment_text(driver.comments.as_ref()),
            url: driver.url.clone(),
            printer_count: driver.printer_count(),
        });
    }

    summaries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    info!(
        drivers = summaries.len(),
        with_url = summaries.iter().filter(|d| d.url.is_some()).count(),
        printers_supported = summaries.iter().map(|d| d.printer_count).sum::<usize>(),
        "driver index built"
    );
    Ok(summaries)
}

/// Writes the driver index as a bare JSON array.
pub fn write_driver_index(path: &Path, drivers: &[DriverSummary]) -> Result<()> {
    let serialized = serde_json::to_string_pretty(drivers).map_err(|e| OutputError::Serialize {
        what: "driver index",
        source: e,
    })?;
    std::fs::write(path, serialized).map_err(|e| OutputError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), drivers = drivers.len(), "wrote driver index");
    Ok(())
}
