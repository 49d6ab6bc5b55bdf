//! Crate-wide error type.

/// Errors produced while loading inputs, validating configuration, or
/// writing reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required-workers vector or preference matrix is empty, ragged, or
    /// resolves to zero employees / time slots.
    #[error("InvalidInputShape: {0}")]
    InvalidInputShape(String),

    /// A [`GaConfig`](crate::ga::GaConfig) parameter is out of range.
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),

    /// A CSV cell could not be parsed as a non-negative integer.
    #[error("ParseError: line={line}, column={column}, value={value:?}")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("CsvError: {0}")]
    Csv(#[from] csv::Error),

    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
