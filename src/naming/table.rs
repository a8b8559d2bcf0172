//! The (year, international name) -> PAGASA name table.

use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::TrackError;

/// Keys are (year, uppercased international name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    entries: HashMap<(u16, String), String>,
}

#[derive(Debug, Deserialize)]
struct MappingRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "International Name")]
    international: String,
    #[serde(rename = "PAGASA Name")]
    local: String,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry. The international name is trimmed and
    /// uppercased; empty and "N/A" names are ignored.
    pub fn insert(&mut self, year: u16, international: &str, local: &str) -> bool {
        let international = international.trim().to_uppercase();
        let local = local.trim();
        if international.is_empty() || international == "N/A" || local.is_empty() {
            return false;
        }

        self.entries.insert((year, international), local.to_string());
        true
    }

    pub fn get(&self, year: u16, international: &str) -> Option<&str> {
        self.entries
            .get(&(year, international.to_uppercase()))
            .map(String::as_str)
    }

    /// Entries of `other` replace entries of `self` with the same key.
    pub fn merge(&mut self, other: NameTable) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a CSV with `Year`, `International Name` and `PAGASA Name`
    /// columns. Rows that cannot be used are skipped.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_csv(path: &Path) -> Result<Self, TrackError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| TrackError::Mapping {
                path: path.to_path_buf(),
                source,
            })?;

        let mut table = NameTable::new();
        let mut ignored = 0;

        for (row_index, result) in rdr.deserialize::<MappingRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    debug!(row_index, error = %e, "unreadable mapping row");
                    ignored += 1;
                    continue;
                }
            };

            let inserted = match row.year.parse::<u16>() {
                Ok(year) => table.insert(year, &row.international, &row.local),
                Err(_) => false,
            };
            if !inserted {
                debug!(
                    row_index,
                    year = %row.year,
                    name = %row.international,
                    "ignoring mapping row"
                );
                ignored += 1;
            }
        }

        info!(entries = table.len(), ignored, "name mapping loaded");

        Ok(table)
    }

    /// Like [`NameTable::from_csv`], but a missing or unreadable file gives
    /// an empty table.
    pub fn from_csv_or_empty(path: &Path) -> Self {
        match Self::from_csv(path) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "continuing with an empty name mapping");
                NameTable::new()
            }
        }
    }
}

impl FromIterator<(u16, &'static str, &'static str)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (u16, &'static str, &'static str)>>(iter: I) -> Self {
        let mut table = NameTable::new();
        for (year, international, local) in iter {
            table.insert(year, international, local);
        }
        table
    }
}

// -- Tests ----------------------------------------------------------------------------
