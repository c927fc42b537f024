//! Names of the generated JSON artifacts and the directories they live in.
//!
//! All paths are relative to the data directory the web front end serves
//! static assets from.

/// Directory of per-printer source JSON files (ingest output).
pub const PRINTER_DIR: &str = "printer";

/// Directory of per-driver source JSON files (ingest output).
pub const DRIVER_DIR: &str = "driver";

/// The consolidated printers collection.
pub const PRINTERS_FILE: &str = "printers.json";

/// The flat drivers index.
pub const DRIVERS_FILE: &str = "drivers.json";

/// Directory of per-printer shard files (split output).
pub const RECORDS_DIR: &str = "printers";

/// The lightweight summary index.
pub const INDEX_FILE: &str = "printersMap.json";
