//! CSV output.

use std::path::Path;

use serde::Serialize;

use crate::{annotate::AnnotatedRow, error::TrackError};

use super::COLUMNS;

#[derive(Serialize)]
struct CsvRow<'a> {
    storm_id: &'a str,
    storm_name: &'a str,
    local_name: &'a str,
    classification: &'a str,
    timestamp: &'a str,
    status: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    pressure_hpa: Option<u16>,
    wind_kt: Option<u16>,
    grade: &'a str,
    year: u16,
}

impl<'a> From<&'a AnnotatedRow> for CsvRow<'a> {
    fn from(r: &'a AnnotatedRow) -> Self {
        CsvRow {
            storm_id: &r.storm_id,
            storm_name: &r.storm_name,
            local_name: &r.local_name,
            classification: r.classification.label(),
            timestamp: &r.timestamp,
            status: r.status.label(),
            latitude: r.latitude,
            longitude: r.longitude,
            pressure_hpa: r.pressure_hpa,
            wind_kt: r.wind_kt,
            grade: &r.grade,
            year: r.year,
        }
    }
}

/// Absent values are written as empty cells. The header is always written.
pub fn save_csv(rows: &[AnnotatedRow], path: &Path) -> Result<(), TrackError> {
    let csv_err = |source| TrackError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    wtr.write_record(COLUMNS).map_err(csv_err)?;
    for row in rows {
        wtr.serialize(CsvRow::from(row)).map_err(csv_err)?;
    }

    wtr.flush().map_err(|source| TrackError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
