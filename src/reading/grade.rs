//! JMA grade codes.

/// Storm category as coded in column 14 of a best-track data line. See the
/// [RSMC Tokyo best track format](https://www.jma.go.jp/jma/jma-eng/jma-center/rsmc-hp-pub-eg/Besttracks/e_format_bst.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    /// 2: tropical depression
    Depression,
    /// 3: tropical storm
    Storm,
    /// 4: severe tropical storm
    SevereStorm,
    /// 5: typhoon
    Typhoon,
    /// 6: extra-tropical cyclone
    Extratropical,
    /// 7: just entering the responsible area of RSMC Tokyo
    EnteringArea,
    /// 9: tropical storm or stronger, intensity not given
    StormOrStronger,
    Unknown,
}

impl Grade {
    pub fn from_code(code: &str) -> Self {
        match code.trim().parse::<u8>() {
            Ok(2) => Grade::Depression,
            Ok(3) => Grade::Storm,
            Ok(4) => Grade::SevereStorm,
            Ok(5) => Grade::Typhoon,
            Ok(6) => Grade::Extratropical,
            Ok(7) => Grade::EnteringArea,
            Ok(9) => Grade::StormOrStronger,
            _ => Grade::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_decode_known_grades() {
        assert_eq!(Grade::from_code("2"), Grade::Depression);
        assert_eq!(Grade::from_code("6"), Grade::Extratropical);
        assert_eq!(Grade::from_code("9"), Grade::StormOrStronger);
    }

    #[test]
    fn should_treat_blank_and_junk_as_unknown() {
        assert_eq!(Grade::from_code(" "), Grade::Unknown);
        assert_eq!(Grade::from_code(""), Grade::Unknown);
        assert_eq!(Grade::from_code("x"), Grade::Unknown);
        assert_eq!(Grade::from_code("8"), Grade::Unknown);
    }
}
