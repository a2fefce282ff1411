use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// RecordError – invariant violations detected while building a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("flight {flight}: success class must be 0 or 1, got {value}")]
    InvalidClass { flight: u32, value: f64 },

    #[error("flight {flight}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { flight: u32, value: f64 },

    #[error("flight {flight}: launch site is empty")]
    EmptySite { flight: u32 },

    #[error("flight number {0} appears more than once")]
    DuplicateFlight(u32),
}

// ---------------------------------------------------------------------------
// SuccessClass – binary landing outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessClass {
    Failure,
    Success,
}

impl SuccessClass {
    /// Numeric encoding used on the scatter y axis and in exported tables.
    pub fn as_u8(self) -> u8 {
        match self {
            SuccessClass::Failure => 0,
            SuccessClass::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuccessClass::Failure => "Failure",
            SuccessClass::Success => "Success",
        }
    }

    fn from_value(flight: u32, value: f64) -> Result<Self, RecordError> {
        if value == 0.0 {
            Ok(SuccessClass::Failure)
        } else if value == 1.0 {
            Ok(SuccessClass::Success)
        } else {
            Err(RecordError::InvalidClass { flight, value })
        }
    }
}

// ---------------------------------------------------------------------------
// BoosterCategory – derived from the booster serial prefix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoosterCategory {
    First,
    Second,
    Latest,
}

impl BoosterCategory {
    pub const ALL: [BoosterCategory; 3] = [
        BoosterCategory::First,
        BoosterCategory::Second,
        BoosterCategory::Latest,
    ];

    /// `B00xx` → first version, `B10xx` → second version, anything else → latest.
    pub fn from_serial(serial: &str) -> Self {
        if serial.starts_with("B00") {
            BoosterCategory::First
        } else if serial.starts_with("B10") {
            BoosterCategory::Second
        } else {
            BoosterCategory::Latest
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoosterCategory::First => "First Version",
            BoosterCategory::Second => "Second Version",
            BoosterCategory::Latest => "Latest Version",
        }
    }
}

impl fmt::Display for BoosterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRow – the tabular shape shared by every data source
// ---------------------------------------------------------------------------

/// One row as it appears in JSON / CSV / Parquet sources (column names follow
/// the source table).  Unvalidated; turn it into a [`LaunchRecord`] with
/// [`LaunchRecord::from_row`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchRow {
    pub flight_number: u32,
    pub booster_version: String,
    pub payload_mass: f64,
    pub orbit: String,
    pub launch_site: String,
    pub outcome: String,
    #[serde(default = "default_flights")]
    pub flights: u32,
    #[serde(deserialize_with = "flag::deserialize")]
    pub grid_fins: bool,
    #[serde(deserialize_with = "flag::deserialize")]
    pub reused: bool,
    #[serde(deserialize_with = "flag::deserialize")]
    pub legs: bool,
    #[serde(default)]
    pub landing_pad: Option<String>,
    pub block: f64,
    pub reused_count: u32,
    pub serial: String,
    pub longitude: f64,
    pub latitude: f64,
    pub class: f64,
}

fn default_flights() -> u32 {
    1
}

/// Boolean columns arrive as JSON booleans, `true`/`false`, Pandas-style
/// `True`/`False`, or `0`/`1` depending on who wrote the file.
mod flag {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Flag::deserialize(d)? {
            Flag::Bool(b) => Ok(b),
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(i) => Err(D::Error::custom(format!("expected 0 or 1, got {i}"))),
            Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                other => Err(D::Error::custom(format!("not a boolean: '{other}'"))),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one validated launch attempt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: u32,
    pub booster_version: String,
    /// Kilograms, always finite and ≥ 0.
    pub payload_mass: f64,
    pub orbit: String,
    pub launch_site: String,
    pub outcome: String,
    pub flights: u32,
    pub grid_fins: bool,
    pub reused: bool,
    pub legs: bool,
    pub landing_pad: Option<String>,
    pub block: f64,
    pub reused_count: u32,
    pub serial: String,
    pub longitude: f64,
    pub latitude: f64,
    pub class: SuccessClass,
    /// Derived once from `serial`.
    pub booster_category: BoosterCategory,
}

impl LaunchRecord {
    pub fn from_row(row: LaunchRow) -> Result<Self, RecordError> {
        let flight = row.flight_number;
        if !row.payload_mass.is_finite() || row.payload_mass < 0.0 {
            return Err(RecordError::InvalidPayload {
                flight,
                value: row.payload_mass,
            });
        }
        if row.launch_site.trim().is_empty() {
            return Err(RecordError::EmptySite { flight });
        }
        let class = SuccessClass::from_value(flight, row.class)?;
        let booster_category = BoosterCategory::from_serial(&row.serial);
        let landing_pad = row.landing_pad.filter(|p| !p.is_empty());

        Ok(LaunchRecord {
            flight_number: row.flight_number,
            booster_version: row.booster_version,
            payload_mass: row.payload_mass,
            orbit: row.orbit,
            launch_site: row.launch_site,
            outcome: row.outcome,
            flights: row.flights,
            grid_fins: row.grid_fins,
            reused: row.reused,
            legs: row.legs,
            landing_pad,
            block: row.block,
            reused_count: row.reused_count,
            serial: row.serial,
            longitude: row.longitude,
            latitude: row.latitude,
            class,
            booster_category,
        })
    }

    /// Back to the tabular shape (the derived category is not a source column).
    pub fn to_row(&self) -> LaunchRow {
        LaunchRow {
            flight_number: self.flight_number,
            booster_version: self.booster_version.clone(),
            payload_mass: self.payload_mass,
            orbit: self.orbit.clone(),
            launch_site: self.launch_site.clone(),
            outcome: self.outcome.clone(),
            flights: self.flights,
            grid_fins: self.grid_fins,
            reused: self.reused,
            legs: self.legs,
            landing_pad: self.landing_pad.clone(),
            block: self.block,
            reused_count: self.reused_count,
            serial: self.serial.clone(),
            longitude: self.longitude,
            latitude: self.latitude,
            class: f64::from(self.class.as_u8()),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete, read-only table
// ---------------------------------------------------------------------------

/// All launch records plus indices computed once at construction.
/// Read-only after construction.  `Default` is the empty table.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Launch sites in order of first appearance.
    sites: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Validate rows and build the site index and payload bounds.
    pub fn from_rows(rows: Vec<LaunchRow>) -> Result<Self, RecordError> {
        let records = rows
            .into_iter()
            .map(LaunchRecord::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, RecordError> {
        let mut seen_flights = BTreeSet::new();
        let mut sites: Vec<String> = Vec::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            if !seen_flights.insert(rec.flight_number) {
                return Err(RecordError::DuplicateFlight(rec.flight_number));
            }
            if !rec.payload_mass.is_finite() || rec.payload_mass < 0.0 {
                return Err(RecordError::InvalidPayload {
                    flight: rec.flight_number,
                    value: rec.payload_mass,
                });
            }
            if !sites.iter().any(|s| *s == rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            payload_min = payload_min.min(rec.payload_mass);
            payload_max = payload_max.max(rec.payload_mass);
        }

        if records.is_empty() {
            payload_min = 0.0;
            payload_max = 0.0;
        }

        Ok(LaunchDataset {
            records,
            sites,
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// `(min, max)` payload mass over all rows; `(0, 0)` when empty.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(flight: u32, site: &str, mass: f64, class: f64, serial: &str) -> LaunchRow {
        LaunchRow {
            flight_number: flight,
            booster_version: "Falcon 9".into(),
            payload_mass: mass,
            orbit: "LEO".into(),
            launch_site: site.into(),
            outcome: "True ASDS".into(),
            flights: 1,
            grid_fins: true,
            reused: false,
            legs: true,
            landing_pad: None,
            block: 5.0,
            reused_count: 0,
            serial: serial.into(),
            longitude: -80.5,
            latitude: 28.5,
            class,
        }
    }

    #[test]
    fn booster_category_from_serial_prefix() {
        assert_eq!(BoosterCategory::from_serial("B0003"), BoosterCategory::First);
        assert_eq!(BoosterCategory::from_serial("B1051"), BoosterCategory::Second);
        assert_eq!(BoosterCategory::from_serial("B2001"), BoosterCategory::Latest);
        assert_eq!(BoosterCategory::from_serial(""), BoosterCategory::Latest);
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let ds = LaunchDataset::from_rows(vec![
            row(1, "KSC LC 39A", 100.0, 1.0, "B1001"),
            row(2, "CCSFS SLC 40", 200.0, 0.0, "B1002"),
            row(3, "KSC LC 39A", 300.0, 1.0, "B1003"),
        ])
        .unwrap();
        assert_eq!(ds.sites(), ["KSC LC 39A", "CCSFS SLC 40"]);
        assert_eq!(ds.payload_bounds(), (100.0, 300.0));
        assert!(ds.contains_site("CCSFS SLC 40"));
        assert!(!ds.contains_site("VAFB SLC 4E"));
    }

    #[test]
    fn rejects_class_outside_zero_one() {
        let err = LaunchDataset::from_rows(vec![row(7, "X", 1.0, 2.0, "B1")]).unwrap_err();
        assert_eq!(err, RecordError::InvalidClass { flight: 7, value: 2.0 });
    }

    #[test]
    fn rejects_negative_payload_and_duplicate_flights() {
        let err = LaunchDataset::from_rows(vec![row(1, "X", -5.0, 1.0, "B1")]).unwrap_err();
        assert!(matches!(err, RecordError::InvalidPayload { flight: 1, .. }));

        let err = LaunchDataset::from_rows(vec![
            row(1, "X", 5.0, 1.0, "B1"),
            row(1, "Y", 6.0, 0.0, "B2"),
        ])
        .unwrap_err();
        assert_eq!(err, RecordError::DuplicateFlight(1));
    }

    #[test]
    fn empty_landing_pad_becomes_none() {
        let mut r = row(1, "X", 5.0, 1.0, "B1");
        r.landing_pad = Some(String::new());
        let rec = LaunchRecord::from_row(r).unwrap();
        assert_eq!(rec.landing_pad, None);
        assert_eq!(rec.to_row().class, 1.0);
    }

    #[test]
    fn empty_dataset_has_zero_bounds() {
        let ds = LaunchDataset::from_rows(Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), (0.0, 0.0));
    }
}
