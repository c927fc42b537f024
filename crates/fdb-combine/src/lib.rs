pub mod error;
pub mod join;

pub use error::{CombineError, Result};
pub use join::{JoinState, combine, write_combined};
