//! Error types for the best-track pipeline.

use std::path::PathBuf;

/// Failures surfaced by parsing, name lookup and export.
///
/// Only [`TrackError::InputNotFound`] and [`TrackError::InputRead`] stop a
/// `process` run; everything else is recovered where it happens.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("input archive not found: {path}")]
    InputNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed reading input archive {path}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read name mapping {path}")]
    Mapping {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("cannot write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("cannot write {path}")]
    Parquet {
        path: PathBuf,
        source: parquet::errors::ParquetError,
    },

    #[error("cannot build record batch")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("primary output {primary} and fallback {fallback} are both unwritable")]
    OutputLocked {
        primary: PathBuf,
        fallback: PathBuf,
        source: Box<TrackError>,
    },
}

/// Why a data line was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineError {
    #[error("field `{field}` is not a number: {raw:?}")]
    NotANumber { field: &'static str, raw: String },

    #[error("field `{field}` is missing")]
    Missing { field: &'static str },

    #[error("data line precedes any header")]
    Orphan,

    #[error("line is not valid UTF-8")]
    NotUtf8,
}
