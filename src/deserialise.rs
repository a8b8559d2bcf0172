//! Reads a best-track archive into storm tracks.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use flate2::read::GzDecoder;
use tracing::{debug, info, instrument};

use crate::{
    error::{LineError, TrackError},
    geofence::BasinPolygon,
    reading::{Record, Track},
};

/// Tracks in encounter order, plus how many data lines were dropped.
#[derive(Debug, Default)]
pub struct Archive {
    pub tracks: Vec<Track>,
    pub skipped: usize,
}

impl Archive {
    pub fn observation_count(&self) -> usize {
        self.tracks.iter().map(|t| t.observations.len()).sum()
    }
}

/// Opens the archive at `path`, decompressing `.gz` files on the fly.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_archive(path: &Path, basin: &BasinPolygon) -> Result<Archive, TrackError> {
    let file = File::open(path).map_err(|source| TrackError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn Read> = match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => Box::new(GzDecoder::new(file)),
        _ => Box::new(file),
    };

    let archive = parse_archive(BufReader::new(reader), basin).map_err(|source| {
        TrackError::InputRead {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        tracks = archive.tracks.len(),
        empty_tracks = archive.tracks.iter().filter(|t| t.is_empty()).count(),
        observations = archive.observation_count(),
        skipped = archive.skipped,
        "archive parsed"
    );

    Ok(archive)
}

/// Groups data lines under the preceding header. Malformed data lines, lines
/// that are not valid UTF-8 and data lines before the first header are
/// logged and dropped.
pub fn parse_archive<R: BufRead>(mut reader: R, basin: &BasinPolygon) -> io::Result<Archive> {
    let mut archive = Archive::default();
    let mut current: Option<Track> = None;

    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            skip(&mut archive, line_number, &LineError::NotUtf8);
            continue;
        };
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        match Record::from_line(line, basin) {
            Record::Header(header) => {
                archive.tracks.extend(current.replace(Track::new(header)));
            }
            Record::Fix(Ok(observation)) => match current.as_mut() {
                Some(track) => track.push(observation),
                None => skip(&mut archive, line_number, &LineError::Orphan),
            },
            Record::Fix(Err(e)) => skip(&mut archive, line_number, &e),
        }
    }

    archive.tracks.extend(current);

    Ok(archive)
}

fn skip(archive: &mut Archive, line_number: usize, reason: &LineError) {
    debug!(line_number, %reason, "skipping data line");
    archive.skipped += 1;
}

// -- Tests ----------------------------------------------------------------------------
