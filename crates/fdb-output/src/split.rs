//! Catalog sharding.
//!
//! Splits the consolidated collection into one file per printer plus a
//! lightweight summary index, trading initial load size for per-record
//! lookups. Writes proceed in fixed-size batches; the batch size only bounds
//! write bursts and progress granularity, never output content.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use fdb_model::artifacts::{INDEX_FILE, RECORDS_DIR};
use fdb_model::{PrinterCatalog, PrinterIndex, PrinterSummary};

use crate::error::{OutputError, Result};

/// Records written per batch.
const SPLIT_BATCH_SIZE: usize = 100;

/// Progress is logged every this many records.
const PROGRESS_INTERVAL: usize = 500;

/// Outcome of a split run.
#[derive(Debug)]
pub struct SplitStats {
    /// Number of shard files written (equals the index length).
    pub records: usize,
    pub records_dir: PathBuf,
    pub index_path: PathBuf,
}

/// Shards `catalog_path` into `output_dir`.
///
/// Writes `printers/<id>.json` per record and `printersMap.json` holding the
/// summary projections. Any filesystem failure is fatal.
pub fn split_catalog(catalog_path: &Path, output_dir: &Path) -> Result<SplitStats> {
    let content = std::fs::read_to_string(catalog_path).map_err(|e| OutputError::FileRead {
        path: catalog_path.to_path_buf(),
        source: e,
    })?;
    let catalog: PrinterCatalog =
        serde_json::from_str(&content).map_err(|e| OutputError::Parse {
            path: catalog_path.to_path_buf(),
            source: e,
        })?;
    info!(printers = catalog.printers.len(), "splitting printer catalog");

    let records_dir = output_dir.join(RECORDS_DIR);
    std::fs::create_dir_all(&records_dir).map_err(|e| OutputError::FileWrite {
        path: records_dir.clone(),
        source: e,
    })?;

    let index = PrinterIndex {
        printers: catalog.printers.iter().map(PrinterSummary::from).collect(),
    };
    let index_path = output_dir.join(INDEX_FILE);
    let serialized = serde_json::to_string_pretty(&index).map_err(|e| OutputError::Serialize {
        what: "summary index",
        source: e,
    })?;
    std::fs::write(&index_path, serialized).map_err(|e| OutputError::FileWrite {
        path: index_path.clone(),
        source: e,
    })?;

    let mut written = 0usize;
    for batch in catalog.printers.chunks(SPLIT_BATCH_SIZE) {
        for printer in batch {
            let shard_path = records_dir.join(format!("{}.json", printer.id));
            let serialized =
                serde_json::to_string_pretty(printer).map_err(|e| OutputError::Serialize {
                    what: "printer shard",
                    source: e,
                })?;
            std::fs::write(&shard_path, serialized).map_err(|e| OutputError::FileWrite {
                path: shard_path.clone(),
                source: e,
            })?;
            written += 1;
            if written % PROGRESS_INTERVAL == 0 {
                debug!(written, total = catalog.printers.len(), "split progress");
            }
        }
    }

    log_size_savings(catalog_path, &index_path);
    info!(
        records = written,
        records_dir = %records_dir.display(),
        index = %index_path.display(),
        "catalog split complete"
    );

    Ok(SplitStats {
        records: written,
        records_dir,
        index_path,
    })
}

/// Reports how much smaller the summary index is than the full catalog.
fn log_size_savings(catalog_path: &Path, index_path: &Path) {
    let (Ok(catalog_meta), Ok(index_meta)) =
        (std::fs::metadata(catalog_path), std::fs::metadata(index_path))
    else {
        return;
    };
    let catalog_size = catalog_meta.len();
    let index_size = index_meta.len();
    if catalog_size == 0 {
        return;
    }
    let savings = (catalog_size.saturating_sub(index_size)) as f64 / catalog_size as f64 * 100.0;
    info!(
        catalog_bytes = catalog_size,
        index_bytes = index_size,
        savings_percent = format!("{savings:.1}"),
        "initial load size reduction"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdb_model::{CombinedPrinter, DriverDetail, PrinterType, SupportStatus};
    use tempfile::TempDir;

    fn combined(id: &str, drivers: usize) -> CombinedPrinter {
        CombinedPrinter {
            id: id.to_string(),
            manufacturer: "HP".to_string(),
            model: id.to_string(),
            series: String::new(),
            connectivity: Vec::new(),
            recommended_driver: None,
            drivers: (0..drivers)
                .map(|n| DriverDetail {
                    id: format!("driver/d{n}"),
                    name: format!("d{n}"),
                    url: None,
                    comments: String::new(),
                    execution: None,
                })
                .collect(),
            printer_type: PrinterType::Laser,
            status: SupportStatus::Perfect,
            functionality: Some("A".to_string()),
            notes: String::new(),
        }
    }

    fn write_catalog(dir: &TempDir, printers: Vec<CombinedPrinter>) -> PathBuf {
        let path = dir.path().join("printers.json");
        let catalog = PrinterCatalog { printers };
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_split_invariants() {
        let dir = TempDir::new().unwrap();
        // More records than one batch to exercise the chunked path.
        let printers: Vec<_> = (0..250).map(|n| combined(&format!("HP-Model_{n:03}"), n % 4)).collect();
        let catalog_path = write_catalog(&dir, printers);

        let stats = split_catalog(&catalog_path, dir.path()).unwrap();
        assert_eq!(stats.records, 250);

        let shard_count = std::fs::read_dir(&stats.records_dir).unwrap().count();
        let index: PrinterIndex =
            serde_json::from_str(&std::fs::read_to_string(&stats.index_path).unwrap()).unwrap();
        assert_eq!(shard_count, index.printers.len());

        for summary in &index.printers {
            let shard_path = stats.records_dir.join(format!("{}.json", summary.id));
            let shard: CombinedPrinter =
                serde_json::from_str(&std::fs::read_to_string(&shard_path).unwrap()).unwrap();
            assert_eq!(summary.driver_count, shard.drivers.len());
            assert_eq!(summary.status, shard.status);
        }
    }

    #[test]
    fn test_shard_content_round_trips() {
        let dir = TempDir::new().unwrap();
        let printer = combined("HP-LaserJet_4", 2);
        let catalog_path = write_catalog(&dir, vec![printer.clone()]);

        let stats = split_catalog(&catalog_path, dir.path()).unwrap();
        let shard: CombinedPrinter = serde_json::from_str(
            &std::fs::read_to_string(stats.records_dir.join("HP-LaserJet_4.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(shard, printer);
    }

    #[test]
    fn test_missing_catalog_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = split_catalog(&dir.path().join("nope.json"), dir.path());
        assert!(matches!(result, Err(OutputError::FileRead { .. })));
    }
}
