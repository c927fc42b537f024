use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombineError {
    #[error(transparent)]
    Discovery(#[from] fdb_ingest::IngestError),

    #[error("failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record json in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CombineError>;
