//! Hand-curated historical corrections to the scraped name table.
//!
//! Bump [`OVERRIDES_VERSION`] whenever an entry is added, changed or removed.

pub const OVERRIDES_VERSION: u32 = 2;

/// (year, international name, PAGASA name)
pub const BUILTIN_OVERRIDES: &[(u16, &str, &str)] = &[
    (1966, "KIT", "EMANG"),
    (1971, "IRMA", "INING"),
    (1973, "NORA", "LUING"),
    (1975, "JUNE", "ROSING"),
    (1978, "RITA", "KADING"),
    (1979, "TIP", "WARLING"),
    (1981, "ELSIE", "TASING"),
    (1983, "FORREST", "ISING"),
    (1984, "VANESSA", "NITANG"),
    (1990, "FLO", "BIDANG"),
    (1991, "THELMA", "URING"),
    (2015, "SOUDELOR", "HANNA"),
];
