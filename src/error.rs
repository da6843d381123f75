use std::io;

use thiserror::Error;

/// Errors of the benchmark harness.
///
/// The containers themselves never fail: absence is reported with `bool` or `Option`.
#[derive(Error, Debug)]
pub enum BenchError {
    /// A parameter is out of range, or a name could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    /// A worker thread panicked before finishing its share of the budget.
    #[error("a worker thread panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, BenchError>;
