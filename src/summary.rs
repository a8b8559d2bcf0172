//! Run statistics reported after export.

use std::{collections::HashSet, path::PathBuf};

use tracing::info;

use crate::{
    annotate::{AnnotatedRow, BasinStatus},
    naming::PRE_ERA_LABEL,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub storms: usize,
    pub rows_inside: usize,
    pub pre_era_storms: usize,
    pub named_rows: usize,
    pub unresolved_storms: usize,
    pub skipped_lines: usize,
    pub written_to: PathBuf,
}

impl Summary {
    pub fn new(rows: &[AnnotatedRow], skipped_lines: usize, written_to: PathBuf) -> Self {
        let mut storms = HashSet::new();
        let mut pre_era = HashSet::new();
        let mut unresolved = HashSet::new();

        for row in rows {
            storms.insert(row.storm_id.as_str());
            if row.local_name == PRE_ERA_LABEL {
                pre_era.insert(row.storm_id.as_str());
            }
            if row.local_name.is_empty() {
                unresolved.insert(row.storm_id.as_str());
            }
        }

        Summary {
            rows: rows.len(),
            storms: storms.len(),
            rows_inside: rows
                .iter()
                .filter(|r| r.status == BasinStatus::Inside)
                .count(),
            pre_era_storms: pre_era.len(),
            named_rows: rows.iter().filter(|r| !r.local_name.is_empty()).count(),
            unresolved_storms: unresolved.len(),
            skipped_lines,
            written_to,
        }
    }

    pub fn log(&self) {
        info!(
            rows = self.rows,
            storms = self.storms,
            rows_inside = self.rows_inside,
            pre_era_storms = self.pre_era_storms,
            named_rows = self.named_rows,
            unresolved_storms = self.unresolved_storms,
            skipped_lines = self.skipped_lines,
            path = %self.written_to.display(),
            "run summary"
        );
    }
}
