//! Six-hourly best-track fixes.

use crate::{error::LineError, geofence::BasinPolygon};

use super::{field, Grade};

/// Two-digit years above this belong to the 1900s, the rest to the 2000s.
pub const YEAR_PIVOT: u16 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year: u16,
    /// Four-digit year followed by MMDDHH.
    pub timestamp: String,
    pub grade_code: String,
    pub grade: Grade,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pressure_hpa: Option<u16>,
    pub wind_kt: Option<u16>,
    pub in_basin: bool,
}

impl Observation {
    /// Parses a data line and tests its position against `basin`.
    ///
    /// The date is required and a non-blank position must be numeric.
    /// Blank positions and blank or junk pressure/wind are kept as absent.
    pub fn from_line(line: &str, basin: &BasinPolygon) -> Result<Self, LineError> {
        let date = field(line, 0, 8).trim();
        let (year, timestamp) = parse_date(date)?;
        let grade_code = field(line, 13, 14).trim().to_string();
        let grade = Grade::from_code(&grade_code);
        let latitude = parse_tenths(field(line, 15, 18), "latitude")?;
        let longitude = parse_tenths(field(line, 19, 23), "longitude")?;
        let pressure_hpa = parse_optional(field(line, 24, 28));
        let wind_kt = parse_optional(field(line, 33, 36));

        let in_basin = match (latitude, longitude) {
            (Some(lat), Some(lon)) => basin.contains(lat, lon),
            _ => false,
        };

        Ok(Observation {
            year,
            timestamp,
            grade_code,
            grade,
            latitude,
            longitude,
            pressure_hpa,
            wind_kt,
            in_basin,
        })
    }
}

pub fn expand_year(yy: u16) -> u16 {
    if yy > YEAR_PIVOT {
        1900 + yy
    } else {
        2000 + yy
    }
}

fn parse_date(date: &str) -> Result<(u16, String), LineError> {
    if date.len() < 2 {
        return Err(LineError::Missing { field: "date" });
    }
    if !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineError::NotANumber {
            field: "date",
            raw: date.to_string(),
        });
    }

    let year = expand_year(date[..2].parse().map_err(|_| LineError::NotANumber {
        field: "date",
        raw: date.to_string(),
    })?);

    Ok((year, format!("{}{}", year, &date[2..])))
}

fn parse_tenths(raw: &str, name: &'static str) -> Result<Option<f64>, LineError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| Some(v / 10.0))
        .ok_or_else(|| LineError::NotANumber {
            field: name,
            raw: raw.to_string(),
        })
}

fn parse_optional(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

// -- Tests ----------------------------------------------------------------------------
