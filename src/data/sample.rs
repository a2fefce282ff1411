use super::model::{LaunchDataset, LaunchRow, RecordError};

// ---------------------------------------------------------------------------
// Built-in demo table (90 Falcon 9 launch attempts)
// ---------------------------------------------------------------------------

const ROWS: usize = 90;

const FIRST_PAYLOADS: [f64; 10] = [
    6123.547647, 525.0, 677.0, 500.0, 3170.0, 3325.0, 2296.0, 1316.0, 4535.0, 4428.0,
];
const FIRST_ORBITS: [&str; 10] = ["LEO", "LEO", "ISS", "PO", "GTO", "GTO", "ISS", "LEO", "GTO", "GTO"];
const FIRST_SERIALS: [&str; 10] = [
    "B0003", "B0005", "B0007", "B1003", "B1004", "B1005", "B1006", "B1007", "B1008", "B1011",
];
const LATER_SERIALS: [&str; 4] = ["B1051", "B1058", "B1060", "B1062"];

/// (site, rows, longitude, latitude)
const SITES: [(&str, usize, f64, f64); 3] = [
    ("CCSFS SLC 40", 55, -80.577366, 28.561857),
    ("KSC LC 39A", 22, -80.603956, 28.608058),
    ("VAFB SLC 4E", 13, -120.610829, 34.632093),
];

/// (outcome, rows), consecutive runs in flight order.
const OUTCOMES: [(&str, usize); 8] = [
    ("None None", 19),
    ("True ASDS", 41),
    ("True RTLS", 14),
    ("False ASDS", 6),
    ("True Ocean", 5),
    ("False Ocean", 2),
    ("None ASDS", 2),
    ("False RTLS", 1),
];

fn expand<T: Copy>(runs: &[(T, usize)]) -> Vec<T> {
    runs.iter()
        .flat_map(|&(value, n)| std::iter::repeat(value).take(n))
        .collect()
}

/// The illustrative fixture table used when no data file is loaded.
pub fn sample_rows() -> Vec<LaunchRow> {
    let sites: Vec<(&str, f64, f64)> = SITES
        .iter()
        .flat_map(|&(site, n, lon, lat)| std::iter::repeat((site, lon, lat)).take(n))
        .collect();
    let outcomes = expand(&OUTCOMES);

    (0..ROWS)
        .map(|i| {
            let early = i < 10;
            let (site, longitude, latitude) = sites[i];
            LaunchRow {
                flight_number: i as u32 + 1,
                booster_version: "Falcon 9".to_string(),
                payload_mass: if early { FIRST_PAYLOADS[i] } else { 6123.547647 },
                orbit: if early { FIRST_ORBITS[i] } else { "LEO" }.to_string(),
                launch_site: site.to_string(),
                outcome: outcomes[i].to_string(),
                flights: 1,
                grid_fins: !early,
                reused: !early,
                legs: i >= 6,
                landing_pad: (!early).then(|| "5e9e3032383ecb6bb234e7ca".to_string()),
                block: if early { 1.0 } else { 5.0 },
                reused_count: if early { 0 } else { i as u32 - 9 },
                serial: if early {
                    FIRST_SERIALS[i]
                } else {
                    LATER_SERIALS[(i - 10) % LATER_SERIALS.len()]
                }
                .to_string(),
                longitude,
                latitude,
                class: if early { 0.0 } else { 1.0 },
            }
        })
        .collect()
}

pub fn sample_dataset() -> Result<LaunchDataset, RecordError> {
    LaunchDataset::from_rows(sample_rows())
}
