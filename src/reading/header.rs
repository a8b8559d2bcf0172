//! Storm header records.

use super::field;

pub const HEADER_MARKER: &str = "66666";
pub const UNNAMED: &str = "UNNAMED";

#[derive(Debug, Clone, PartialEq)]
pub struct TrackHeader {
    pub id: String,
    pub name: String,
}

impl TrackHeader {
    pub fn is_header(line: &str) -> bool {
        line.starts_with(HEADER_MARKER)
    }

    pub fn from_line(line: &str) -> Self {
        let id = field(line, 6, 10).trim().to_string();
        let name = match field(line, 30, 50).trim() {
            "" => UNNAMED.to_string(),
            name => name.to_string(),
        };

        TrackHeader { id, name }
    }
}
