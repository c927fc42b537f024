//! Per-directory XML to JSON conversion.
//!
//! For each XML file in a source directory, write a same-stem `.json` file
//! into the output directory. Driver files additionally get their printer
//! reference list normalized into a uniform object shape. A malformed file is
//! logged and skipped; the run continues with the remaining files.

use std::path::Path;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use fdb_model::reference_id;

use crate::discovery::list_xml_files;
use crate::error::{IngestError, Result};
use crate::xml_tree::parse_xml_tree;

/// Which entity a source directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Printer,
    Driver,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Printer => "printer",
            EntityKind::Driver => "driver",
        }
    }
}

/// Outcome counts for one directory conversion run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertStats {
    /// Files successfully converted and written.
    pub converted: usize,
    /// Malformed files skipped.
    pub skipped: usize,
}

/// Converts every XML file in `source_dir` into a JSON file in `output_dir`.
///
/// Parse and read failures skip the file; directory and write failures are
/// fatal.
pub fn convert_directory(
    source_dir: &Path,
    output_dir: &Path,
    kind: EntityKind,
) -> Result<ConvertStats> {
    std::fs::create_dir_all(output_dir).map_err(|e| IngestError::FileWrite {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let files = list_xml_files(source_dir)?;
    let mut stats = ConvertStats::default();

    for path in &files {
        let tree = match convert_file(path, kind) {
            Ok(tree) => tree,
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping malformed source file");
                stats.skipped += 1;
                continue;
            }
        };

        let json_path = output_dir.join(format!(
            "{}.json",
            path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("")
        ));
        let serialized = serde_json::to_string_pretty(&tree).map_err(|e| IngestError::Json {
            path: json_path.clone(),
            source: e,
        })?;
        std::fs::write(&json_path, serialized).map_err(|e| IngestError::FileWrite {
            path: json_path.clone(),
            source: e,
        })?;
        debug!(path = %json_path.display(), "wrote converted record");
        stats.converted += 1;
    }

    info!(
        source = %source_dir.display(),
        kind = kind.as_str(),
        converted = stats.converted,
        skipped = stats.skipped,
        "converted xml sources"
    );
    Ok(stats)
}

/// Parses one XML file into its JSON tree, normalizing driver references.
pub fn convert_file(path: &Path, kind: EntityKind) -> Result<Value> {
    let xml = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut tree = parse_xml_tree(&xml).map_err(|e| IngestError::Xml {
        path: path.to_path_buf(),
        source: e,
    })?;
    if kind == EntityKind::Driver {
        normalize_driver_refs(&mut tree);
    }
    Ok(tree)
}

/// Rewrites `driver.printers.printer` into an array of objects that all carry
/// an `id` field, whatever shape the upstream export used.
fn normalize_driver_refs(tree: &mut Value) {
    let Some(references) = tree.pointer_mut("/driver/printers/printer") else {
        return;
    };
    let entries = match std::mem::take(references) {
        Value::Array(entries) => entries,
        single => vec![single],
    };
    let normalized = entries.into_iter().map(normalize_reference).collect();
    *references = Value::Array(normalized);
}

fn normalize_reference(entry: Value) -> Value {
    let id = reference_id(&entry).map(str::to_owned);
    match entry {
        Value::String(text) => json!({ "id": text }),
        Value::Object(mut fields) => {
            if let Some(id) = id {
                fields.insert("id".to_string(), Value::String(id));
            }
            Value::Object(fields)
        }
        other => other,
    }
}
