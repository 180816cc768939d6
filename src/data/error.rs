use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// Anything that can go wrong while reading the dataset file.
///
/// A `LoadError` is fatal for the pages that need the dataset: the UI shows
/// it as a blocking status message until a readable file is opened.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Column validation
// ---------------------------------------------------------------------------

/// A plot axis or filter column that is not part of the numeric catalog.
///
/// The UI only offers catalog members, so this is a defensive check; when it
/// fires it aborts the single render that requested the column, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown numeric column '{0}'")]
pub struct UnknownColumnError(pub String);
