//! A storm's full life history.

use super::{Observation, TrackHeader};

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub observations: Vec<Observation>,
    entered_basin: bool,
}

impl Track {
    pub fn new(header: TrackHeader) -> Self {
        Track {
            id: header.id,
            name: header.name,
            observations: Vec::new(),
            entered_basin: false,
        }
    }

    /// Appends the next fix in chronological order.
    pub fn push(&mut self, observation: Observation) {
        self.entered_basin |= observation.in_basin;
        self.observations.push(observation);
    }

    pub fn entered_basin(&self) -> bool {
        self.entered_basin
    }

    /// Year of the first fix, which keys the local name lookup.
    pub fn first_year(&self) -> Option<u16> {
        self.observations.first().map(|o| o.year)
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
