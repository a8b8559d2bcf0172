//! Writes annotated rows to CSV or parquet.

pub mod csv_file;
pub mod parquet_file;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::{info, warn};

use crate::{annotate::AnnotatedRow, error::TrackError};

pub use csv_file::save_csv;
pub use parquet_file::save_parquet;

/// Output columns, in order.
pub const COLUMNS: [&str; 12] = [
    "StormID",
    "StormName",
    "PAGASA_Name",
    "Classification",
    "Timestamp",
    "In_PAR",
    "Latitude",
    "Longitude",
    "Pressure_hPa",
    "WindSpeed_kt",
    "Grade",
    "Year",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    /// Picks the format from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => OutputFormat::Parquet,
            _ => OutputFormat::Csv,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

pub fn save(rows: &[AnnotatedRow], path: &Path, format: OutputFormat) -> Result<(), TrackError> {
    match format {
        OutputFormat::Csv => save_csv(rows, path),
        OutputFormat::Parquet => save_parquet(rows, path),
    }
}

/// Writes to `primary`, or to `fallback` when `primary` cannot be written
/// (typically because another program holds it open). Returns the path
/// actually written.
pub fn save_with_fallback(
    rows: &[AnnotatedRow],
    primary: &Path,
    fallback: &Path,
    format: OutputFormat,
) -> Result<PathBuf, TrackError> {
    match save(rows, primary, format) {
        Ok(()) => {
            info!(rows = rows.len(), path = %primary.display(), "dataset saved");
            Ok(primary.to_path_buf())
        }
        Err(e) => {
            warn!(
                error = %e,
                fallback = %fallback.display(),
                "primary output unwritable, using fallback"
            );
            save(rows, fallback, format).map_err(|source| TrackError::OutputLocked {
                primary: primary.to_path_buf(),
                fallback: fallback.to_path_buf(),
                source: Box::new(source),
            })?;
            info!(rows = rows.len(), path = %fallback.display(), "dataset saved to fallback");
            Ok(fallback.to_path_buf())
        }
    }
}

/// `data.csv` -> `data-fallback.csv`
pub fn fallback_path(primary: &Path) -> PathBuf {
    let stem = primary
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let file_name = match primary.extension() {
        Some(ext) => format!("{}-fallback.{}", stem, ext.to_string_lossy()),
        None => format!("{}-fallback", stem),
    };

    primary.with_file_name(file_name)
}

// -- Tests ----------------------------------------------------------------------------
