//! Single-point access to the geofence and the classifier.

use tracing::debug;

use crate::{
    classification::{classify_raw, Intensity},
    geofence::PAR,
};

pub fn check_point(lat: f64, lon: f64) -> bool {
    debug!(bounding_box = ?PAR.bounding_box(), "PAR extent");
    PAR.contains(lat, lon)
}

pub fn classify(grade: &str, wind: &str, pressure: &str) -> Intensity {
    classify_raw(grade, wind, pressure)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_check_point() {
        assert!(check_point(14.6, 121.0));
        assert!(!check_point(35.7, 139.7));
    }

    #[test]
    fn should_classify_raw_arguments() {
        assert_eq!(classify("", "", "0960"), Intensity::Typhoon);
        assert_eq!(classify("9", "", ""), Intensity::TropicalStorm);
    }
}
