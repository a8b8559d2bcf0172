//! Fixed-width records of the JMA best-track archive.
//!
//! See the [RSMC Tokyo format description](https://www.jma.go.jp/jma/jma-eng/jma-center/rsmc-hp-pub-eg/Besttracks/e_format_bst.html).

pub mod grade;
pub mod header;
pub mod observation;
pub mod track;

pub use grade::Grade;
pub use header::TrackHeader;
pub use observation::Observation;
pub use track::Track;

use crate::{error::LineError, geofence::BasinPolygon};

/// One line of the archive.
#[derive(Debug)]
pub enum Record {
    Header(TrackHeader),
    Fix(Result<Observation, LineError>),
}

impl Record {
    pub fn from_line(line: &str, basin: &BasinPolygon) -> Self {
        if TrackHeader::is_header(line) {
            Record::Header(TrackHeader::from_line(line))
        } else {
            Record::Fix(Observation::from_line(line, basin))
        }
    }
}

/// Slice of a fixed-width line by 0-based character offsets. Short lines
/// yield a shorter (possibly empty) field rather than failing.
pub(crate) fn field(line: &str, start: usize, end: usize) -> &str {
    if line.is_ascii() {
        let len = line.len();
        return line.get(start.min(len)..end.min(len)).unwrap_or("");
    }

    let byte_offset = |chars: usize| {
        line.char_indices()
            .nth(chars)
            .map_or(line.len(), |(offset, _)| offset)
    };
    &line[byte_offset(start)..byte_offset(end.max(start))]
}
