use std::path::PathBuf;

/// One row of the end-of-run summary.
#[derive(Debug)]
pub struct StageSummary {
    pub stage: String,
    /// Records produced by the stage.
    pub records: usize,
    /// Records or files skipped with a warning.
    pub skipped: usize,
    /// Primary artifact the stage wrote.
    pub output: PathBuf,
}
