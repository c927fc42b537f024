pub mod drivers_index;
pub mod error;
pub mod split;

pub use drivers_index::{build_driver_index, write_driver_index};
pub use error::{OutputError, Result};
pub use split::{SplitStats, split_catalog};
