pub mod artifacts;
pub mod driver;
pub mod enums;
pub mod error;
pub mod ids;
pub mod printer;
pub mod refs;
pub mod status;
pub mod text;

pub use driver::{DriverDocument, DriverSummary, RawDriver};
pub use enums::{PrinterType, SupportStatus};
pub use error::{ModelError, Result};
pub use ids::{DRIVER_PREFIX, PRINTER_PREFIX, ensure_prefix, split_printer_id, strip_namespace};
pub use printer::{
    CombinedPrinter, DriverDetail, PrinterCatalog, PrinterDocument, PrinterIndex, PrinterSummary,
    RawPrinter, mechanism_type,
};
pub use refs::{reference_comments, reference_entries, reference_id};
pub use status::{SupportSource, classify_support};
pub use text::comment_text;
