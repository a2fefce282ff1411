use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Filter inputs: site selector and payload interval
// ---------------------------------------------------------------------------

/// Label and value of the "every site" entry in the site dropdown.
pub const ALL_SITES: &str = "All Sites";

/// Which launch site(s) the dashboard is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelector {
    /// Map a dropdown value to a selector; [`ALL_SITES`] is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelector::AllSites
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelector::AllSites => true,
            SiteSelector::Site(name) => record.launch_site == *name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteSelector::AllSites => ALL_SITES,
            SiteSelector::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload-mass interval in kilograms.  Membership is exclusive on both ends,
/// so rows sitting exactly on `low` or `high` are not selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// `low < mass < high`
    pub fn contains(&self, mass: f64) -> bool {
        mass > self.low && mass < self.high
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Rows matching the site selector (payload ignored).
pub fn site_rows<'a>(dataset: &'a LaunchDataset, site: &SiteSelector) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| site.matches(rec))
        .collect()
}

/// Rows matching the site selector AND lying strictly inside `range`.
/// An empty result is valid output.
pub fn select_rows<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelector,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| site.matches(rec) && range.contains(rec.payload_mass))
        .collect()
}
