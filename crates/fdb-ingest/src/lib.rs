pub mod convert;
pub mod discovery;
pub mod error;
pub mod xml_tree;

pub use convert::{ConvertStats, EntityKind, convert_directory, convert_file};
pub use discovery::{list_json_files, list_xml_files};
pub use error::{IngestError, Result};
pub use xml_tree::{ATTRIBUTE_PREFIX, TEXT_KEY, parse_xml_tree};
