//! Resolves a storm's local (PAGASA) name.
//!
//! Lookups walk [`RULES`] in order: curated overrides, then the scraped
//! mapping table, then the pre-era and outside-basin sentinels. A storm no
//! rule matches keeps an empty name for later curation.

pub mod overrides;
pub mod table;

pub use overrides::{BUILTIN_OVERRIDES, OVERRIDES_VERSION};
pub use table::NameTable;

use tracing::trace;

/// Local names are only systematically recorded from this year on.
pub const ERA_START_YEAR: u16 = 1963;
pub const PRE_ERA_LABEL: &str = "PRE-1963";
pub const OUTSIDE_LABEL: &str = "OUTSIDE PAR";

/// What the resolver is asked about one storm.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    pub year: u16,
    pub name: &'a str,
    pub entered_basin: bool,
}

pub struct NameRule {
    pub name: &'static str,
    pub apply: fn(&NameResolver, &Query) -> Option<String>,
}

pub const RULES: [NameRule; 4] = [
    NameRule {
        name: "override",
        apply: from_overrides,
    },
    NameRule {
        name: "mapping table",
        apply: from_table,
    },
    NameRule {
        name: "pre-era",
        apply: pre_era,
    },
    NameRule {
        name: "outside basin",
        apply: outside_basin,
    },
];

fn from_overrides(resolver: &NameResolver, q: &Query) -> Option<String> {
    resolver.overrides.get(q.year, q.name).map(str::to_string)
}

fn from_table(resolver: &NameResolver, q: &Query) -> Option<String> {
    resolver.table.get(q.year, q.name).map(str::to_string)
}

fn pre_era(_: &NameResolver, q: &Query) -> Option<String> {
    (q.entered_basin && q.year < ERA_START_YEAR).then(|| PRE_ERA_LABEL.to_string())
}

fn outside_basin(_: &NameResolver, q: &Query) -> Option<String> {
    (!q.entered_basin).then(|| OUTSIDE_LABEL.to_string())
}

/// Read-only once built; share it across tasks behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    overrides: NameTable,
    table: NameTable,
}

impl NameResolver {
    /// Built-in overrides layered above `table`.
    pub fn new(table: NameTable) -> Self {
        NameResolver {
            overrides: BUILTIN_OVERRIDES.iter().copied().collect(),
            table,
        }
    }

    /// Adds user overrides above the built-in ones.
    pub fn with_overrides(mut self, extra: NameTable) -> Self {
        self.overrides.merge(extra);
        self
    }

    pub fn resolve(&self, year: u16, name: &str, entered_basin: bool) -> String {
        let query = Query {
            year,
            name,
            entered_basin,
        };

        RULES
            .iter()
            .find_map(|rule| {
                let local = (rule.apply)(self, &query)?;
                trace!(rule = rule.name, year, name, local = %local, "local name resolved");
                Some(local)
            })
            .unwrap_or_default()
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    pub fn table_count(&self) -> usize {
        self.table.len()
    }
}

// -- Tests ----------------------------------------------------------------------------
