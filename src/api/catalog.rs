//! Size and region lookup
//!
//! The v1 API addresses sizes and regions by numeric id, while people think
//! in slugs (`512mb`, `nyc2`). Selectors accept either form and are resolved
//! to an id before a request is built.

use super::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Droplet sizes known to the v1 API: (slug, id)
pub const SIZES: &[(&str, u64)] = &[
    ("512mb", 66),
    ("1gb", 63),
    ("2gb", 62),
    ("4gb", 64),
    ("8gb", 65),
    ("16gb", 61),
    ("32gb", 60),
    ("48gb", 70),
    ("64gb", 69),
];

/// Regions known to the v1 API: (slug, id)
pub const REGIONS: &[(&str, u64)] = &[
    ("nyc1", 1),
    ("ams1", 2),
    ("sfo1", 3),
    ("nyc2", 4),
    ("ams2", 5),
    ("sgp1", 6),
    ("lon1", 7),
    ("nyc3", 8),
];

/// Either a numeric id or a slug to be looked up in a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(u64),
    Slug(String),
}

impl Selector {
    fn parse(kind: &str, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidArgument(format!("{kind} must not be empty")));
        }
        Ok(match raw.parse::<u64>() {
            Ok(id) => Selector::Id(id),
            Err(_) => Selector::Slug(raw.to_ascii_lowercase()),
        })
    }

    fn resolve(&self, kind: &str, table: &[(&str, u64)]) -> Result<u64> {
        match self {
            Selector::Id(id) => Ok(*id),
            Selector::Slug(slug) => lookup(table, slug).ok_or_else(|| {
                let known: Vec<&str> = table.iter().map(|(s, _)| *s).collect();
                Error::InvalidArgument(format!(
                    "unknown {kind} {slug:?} (known: {})",
                    known.join(", ")
                ))
            }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "{id}"),
            Selector::Slug(slug) => f.write_str(slug),
        }
    }
}

fn lookup(table: &[(&str, u64)], slug: &str) -> Option<u64> {
    table
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(slug))
        .map(|(_, id)| *id)
}

/// Droplet size given as an id or a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSelector(pub Selector);

/// Region given as an id or a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSelector(pub Selector);

impl SizeSelector {
    pub fn id(id: u64) -> Self {
        Self(Selector::Id(id))
    }

    /// Numeric size id, looking slugs up in [`SIZES`].
    pub fn resolve(&self) -> Result<u64> {
        self.0.resolve("size", SIZES)
    }
}

impl RegionSelector {
    pub fn id(id: u64) -> Self {
        Self(Selector::Id(id))
    }

    /// Numeric region id, looking slugs up in [`REGIONS`].
    pub fn resolve(&self) -> Result<u64> {
        self.0.resolve("region", REGIONS)
    }
}

impl FromStr for SizeSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse("size", s).map(Self)
    }
}

impl FromStr for RegionSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse("region", s).map(Self)
    }
}
