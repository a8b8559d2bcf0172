//! Folds classification, local names and PAR status over each track.

use std::{fmt, panic, sync::Arc};

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    classification::{classify, Intensity},
    naming::NameResolver,
    reading::Track,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasinStatus {
    /// Not yet entered PAR.
    Outside,
    Inside,
    /// Outside PAR after having been inside.
    Exited,
}

impl BasinStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BasinStatus::Outside => "Outside",
            BasinStatus::Inside => "Inside",
            BasinStatus::Exited => "Exited",
        }
    }
}

impl fmt::Display for BasinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One exported row: a fix plus its storm-level annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRow {
    pub storm_id: String,
    pub storm_name: String,
    pub local_name: String,
    pub classification: Intensity,
    pub timestamp: String,
    pub status: BasinStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pressure_hpa: Option<u16>,
    pub wind_kt: Option<u16>,
    pub grade: String,
    pub year: u16,
}

/// Annotates every fix of `track` in chronological order. Empty tracks
/// produce no rows.
pub fn annotate_track(track: &Track, resolver: &NameResolver) -> Vec<AnnotatedRow> {
    let Some(first_year) = track.first_year() else {
        debug!(id = %track.id, name = %track.name, "dropping track without fixes");
        return Vec::new();
    };

    let local_name = resolver.resolve(first_year, &track.name, track.entered_basin());
    let mut entered = false;

    track
        .observations
        .iter()
        .map(|obs| {
            let status = if obs.in_basin {
                entered = true;
                BasinStatus::Inside
            } else if entered {
                BasinStatus::Exited
            } else {
                BasinStatus::Outside
            };

            AnnotatedRow {
                storm_id: track.id.clone(),
                storm_name: track.name.clone(),
                local_name: local_name.clone(),
                classification: classify(
                    obs.grade,
                    obs.wind_kt.map(f64::from),
                    obs.pressure_hpa.map(f64::from),
                ),
                timestamp: obs.timestamp.clone(),
                status,
                latitude: obs.latitude,
                longitude: obs.longitude,
                pressure_hpa: obs.pressure_hpa,
                wind_kt: obs.wind_kt,
                grade: obs.grade_code.clone(),
                year: obs.year,
            }
        })
        .collect()
}

/// Annotates all tracks concurrently, one task per track. Rows come back
/// grouped by storm in the order the tracks were given.
pub async fn annotate_all(tracks: Vec<Track>, resolver: Arc<NameResolver>) -> Vec<AnnotatedRow> {
    let tasks: Vec<_> = tracks
        .into_iter()
        .map(|track| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { annotate_track(&track, &resolver) })
        })
        .collect();

    join_in_order(tasks).await
}

/// Concatenates task outputs in spawn order. A panicked task re-raises its
/// panic here so no track's rows go missing.
async fn join_in_order<T>(tasks: Vec<JoinHandle<Vec<T>>>) -> Vec<T> {
    let mut rows = Vec::new();
    for result in join_all(tasks).await {
        match result {
            Ok(task_rows) => rows.extend(task_rows),
            Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
            Err(e) => panic!("annotation task cancelled: {e}"),
        }
    }
    rows
}

// -- Tests ----------------------------------------------------------------------------
