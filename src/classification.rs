//! Intensity classification from grade, wind and pressure.
//!
//! Classification walks [`RULES`] in order and takes the first rule that
//! produces a label. Thresholds follow the PAGASA 2022 scale.

use std::fmt;

use tracing::trace;

use crate::reading::Grade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Intensity {
    Unclassified,
    TropicalDepression,
    TropicalStorm,
    SevereTropicalStorm,
    Typhoon,
    SuperTyphoon,
    ExtratropicalCyclone,
}

impl Intensity {
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Unclassified => "",
            Intensity::TropicalDepression => "Tropical Depression",
            Intensity::TropicalStorm => "Tropical Storm",
            Intensity::SevereTropicalStorm => "Severe Tropical Storm",
            Intensity::Typhoon => "Typhoon",
            Intensity::SuperTyphoon => "Super Typhoon",
            Intensity::ExtratropicalCyclone => "Extra-tropical Cyclone",
        }
    }

    /// Band for a measured sustained wind in knots: <34, 34-47, 48-63,
    /// 64-99 and >=100. Measured winds are whole knots.
    pub fn from_wind(kt: f64) -> Self {
        if kt < 34.0 {
            Intensity::TropicalDepression
        } else if kt < 48.0 {
            Intensity::TropicalStorm
        } else if kt < 64.0 {
            Intensity::SevereTropicalStorm
        } else if kt < 100.0 {
            Intensity::Typhoon
        } else {
            Intensity::SuperTyphoon
        }
    }

    /// Band for an estimated wind using the inclusive integer bands as
    /// listed. An estimate strictly between two bands (47 < kt < 48,
    /// 63 < kt < 64, 99 < kt < 100) has no band.
    pub fn from_estimated_wind(kt: f64) -> Option<Self> {
        match kt {
            kt if kt < 34.0 => Some(Intensity::TropicalDepression),
            kt if (34.0..=47.0).contains(&kt) => Some(Intensity::TropicalStorm),
            kt if (48.0..=63.0).contains(&kt) => Some(Intensity::SevereTropicalStorm),
            kt if (64.0..=99.0).contains(&kt) => Some(Intensity::Typhoon),
            kt if kt >= 100.0 => Some(Intensity::SuperTyphoon),
            _ => None,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grade 9 with neither wind nor pressure carries no measured intensity.
/// Labelling it a tropical storm is a minimal assumption, not a physical rule.
pub const UNSPECIFIED_STORM_POLICY: Intensity = Intensity::TropicalStorm;

/// One fix as seen by the classifier.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub grade: Grade,
    pub wind_kt: Option<f64>,
    pub pressure_hpa: Option<f64>,
}

pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Sample) -> Option<Intensity>,
}

pub const RULES: [Rule; 4] = [
    Rule {
        name: "extratropical",
        apply: extratropical,
    },
    Rule {
        name: "measured wind",
        apply: measured_wind,
    },
    Rule {
        name: "pressure estimate",
        apply: pressure_estimate,
    },
    Rule {
        name: "grade table",
        apply: grade_table,
    },
];

pub fn classify(grade: Grade, wind_kt: Option<f64>, pressure_hpa: Option<f64>) -> Intensity {
    let sample = Sample {
        grade,
        wind_kt: wind_kt.filter(|v| v.is_finite()),
        pressure_hpa: pressure_hpa.filter(|v| v.is_finite()),
    };

    RULES
        .iter()
        .find_map(|rule| {
            let intensity = (rule.apply)(&sample)?;
            trace!(rule = rule.name, ?sample, %intensity, "classified");
            Some(intensity)
        })
        .unwrap_or(Intensity::Unclassified)
}

/// Classifies raw archive text. Blank or unparseable numbers count as absent.
pub fn classify_raw(grade: &str, wind_kt: &str, pressure_hpa: &str) -> Intensity {
    classify(
        Grade::from_code(grade),
        parse_optional(wind_kt),
        parse_optional(pressure_hpa),
    )
}

fn parse_optional(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Atkinson & Holliday (1977) wind-pressure relation for the NW Pacific.
/// Zero at or above 1010 hPa.
pub fn estimate_wind_from_pressure(pressure_hpa: f64) -> f64 {
    if pressure_hpa >= 1010.0 {
        return 0.0;
    }
    6.7 * (1010.0 - pressure_hpa).powf(0.644)
}

fn extratropical(s: &Sample) -> Option<Intensity> {
    (s.grade == Grade::Extratropical).then_some(Intensity::ExtratropicalCyclone)
}

fn measured_wind(s: &Sample) -> Option<Intensity> {
    s.wind_kt.map(Intensity::from_wind)
}

/// Estimates falling between two bands yield `None`, leaving the fix to
/// the grade table.
fn pressure_estimate(s: &Sample) -> Option<Intensity> {
    let pressure = s.pressure_hpa?;
    let estimate = Intensity::from_estimated_wind(estimate_wind_from_pressure(pressure))?;

    // A grade 9 fix is at least storm strength whatever the estimate says.
    if estimate == Intensity::TropicalDepression && s.grade == Grade::StormOrStronger {
        return Some(Intensity::TropicalStorm);
    }
    Some(estimate)
}

fn grade_table(s: &Sample) -> Option<Intensity> {
    match s.grade {
        Grade::Depression => Some(Intensity::TropicalDepression),
        Grade::Storm => Some(Intensity::TropicalStorm),
        Grade::SevereStorm => Some(Intensity::SevereTropicalStorm),
        Grade::Typhoon => Some(Intensity::Typhoon),
        Grade::StormOrStronger => Some(UNSPECIFIED_STORM_POLICY),
        _ => None,
    }
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    const GRADES: [Grade; 8] = [
        Grade::Depression,
        Grade::Storm,
        Grade::SevereStorm,
        Grade::Typhoon,
        Grade::Extratropical,
        Grade::EnteringArea,
        Grade::StormOrStronger,
        Grade::Unknown,
    ];

    #[test]
    fn should_label_extratropical_regardless_of_wind() {
        assert_eq!(
            classify(Grade::Extratropical, Some(120.0), Some(930.0)),
            Intensity::ExtratropicalCyclone
        );
        assert_eq!(classify_raw("6", "", ""), Intensity::ExtratropicalCyclone);
    }

    #[test]
    fn should_band_measured_wind_inclusively() {
        let cases = [
            (33.0, Intensity::TropicalDepression),
            (34.0, Intensity::TropicalStorm),
            (47.0, Intensity::TropicalStorm),
            (48.0, Intensity::SevereTropicalStorm),
            (63.0, Intensity::SevereTropicalStorm),
            (64.0, Intensity::Typhoon),
            (99.0, Intensity::Typhoon),
            (100.0, Intensity::SuperTyphoon),
        ];
        for (wind, expected) in cases {
            assert_eq!(classify(Grade::Unknown, Some(wind), None), expected, "{wind}kt");
        }
    }

    #[test]
    fn should_prefer_wind_over_pressure() {
        assert_eq!(
            classify(Grade::Typhoon, Some(40.0), Some(920.0)),
            Intensity::TropicalStorm
        );
    }

    #[test]
    fn should_estimate_typhoon_from_960_hpa() {
        let estimate = estimate_wind_from_pressure(960.0);
        assert!((estimate - 83.2).abs() < 0.1, "estimate was {estimate}");
        assert_eq!(classify_raw("5", "", "0960"), Intensity::Typhoon);
    }

    #[test]
    fn should_defer_to_grade_when_estimate_between_bands() {
        // 989 hPa ~ 47.6 kt, 977 hPa ~ 63.7 kt, 944 hPa ~ 99.5 kt
        assert_eq!(classify_raw("5", "", "0989"), Intensity::Typhoon);
        assert_eq!(classify_raw("4", "", "0977"), Intensity::SevereTropicalStorm);
        assert_eq!(classify_raw("2", "", "0944"), Intensity::TropicalDepression);
        assert_eq!(classify_raw("", "", "0989"), Intensity::Unclassified);
    }

    #[test]
    fn should_band_estimates_inclusively() {
        assert_eq!(Intensity::from_estimated_wind(33.9), Some(Intensity::TropicalDepression));
        assert_eq!(Intensity::from_estimated_wind(47.0), Some(Intensity::TropicalStorm));
        assert_eq!(Intensity::from_estimated_wind(47.5), None);
        assert_eq!(Intensity::from_estimated_wind(48.0), Some(Intensity::SevereTropicalStorm));
        assert_eq!(Intensity::from_estimated_wind(63.5), None);
        assert_eq!(Intensity::from_estimated_wind(99.0), Some(Intensity::Typhoon));
        assert_eq!(Intensity::from_estimated_wind(99.5), None);
        assert_eq!(Intensity::from_estimated_wind(100.0), Some(Intensity::SuperTyphoon));
    }

    #[test]
    fn should_estimate_zero_at_or_above_1010() {
        assert_eq!(estimate_wind_from_pressure(1010.0), 0.0);
        assert_eq!(estimate_wind_from_pressure(1020.0), 0.0);
        assert_eq!(
            classify(Grade::Unknown, None, Some(1012.0)),
            Intensity::TropicalDepression
        );
    }

    #[test]
    fn should_trust_grade_9_over_weak_estimate() {
        assert_eq!(
            classify(Grade::StormOrStronger, None, Some(1000.0)),
            Intensity::TropicalStorm
        );
        assert_eq!(
            classify(Grade::Depression, None, Some(1000.0)),
            Intensity::TropicalDepression
        );
    }

    #[test]
    fn should_not_downgrade_strong_grade_9_estimate() {
        assert_eq!(
            classify(Grade::StormOrStronger, None, Some(950.0)),
            Intensity::Typhoon
        );
    }

    #[test]
    fn should_fall_back_to_grade_table() {
        assert_eq!(classify_raw("2", "", ""), Intensity::TropicalDepression);
        assert_eq!(classify_raw("3", "", ""), Intensity::TropicalStorm);
        assert_eq!(classify_raw("4", "", ""), Intensity::SevereTropicalStorm);
        assert_eq!(classify_raw("5", "", ""), Intensity::Typhoon);
        assert_eq!(classify_raw("9", "", ""), UNSPECIFIED_STORM_POLICY);
    }

    #[test]
    fn should_leave_unknown_grade_unclassified() {
        assert_eq!(classify_raw("7", "", ""), Intensity::Unclassified);
        assert_eq!(classify_raw("", "", ""), Intensity::Unclassified);
        assert_eq!(Intensity::Unclassified.label(), "");
    }

    #[test]
    fn should_treat_junk_numbers_as_absent() {
        assert_eq!(classify_raw("3", "abc", "  "), Intensity::TropicalStorm);
        assert_eq!(classify(Grade::Storm, Some(f64::NAN), None), Intensity::TropicalStorm);
    }

    #[test]
    fn should_never_lower_band_as_wind_rises() {
        let pressures = [None, Some(900.0), Some(1000.0), Some(1015.0)];
        for grade in GRADES {
            for pressure in pressures {
                let mut previous = classify(grade, Some(0.0), pressure);
                for wind in 1..200 {
                    let current = classify(grade, Some(wind as f64), pressure);
                    assert!(current >= previous, "{grade:?} {pressure:?} {wind}kt");
                    previous = current;
                }
            }
        }
    }

    #[test]
    fn should_classify_every_combination() {
        let winds = [None, Some(0.0), Some(47.5), Some(250.0), Some(-5.0)];
        let pressures = [None, Some(870.0), Some(1010.0), Some(1100.0), Some(-1.0)];
        for grade in GRADES {
            for wind in winds {
                for pressure in pressures {
                    let _ = classify(grade, wind, pressure);
                }
            }
        }
    }

    #[test]
    fn should_name_every_rule() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["extratropical", "measured wind", "pressure estimate", "grade table"]
        );
    }
}
