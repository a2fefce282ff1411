use serde::Serialize;

use crate::data::filter::{PayloadRange, SiteSelector, select_rows, site_rows};
use crate::data::model::{LaunchDataset, SuccessClass};

// ---------------------------------------------------------------------------
// Chart specifications (backend-agnostic)
// ---------------------------------------------------------------------------

pub const SCATTER_X_LABEL: &str = "Payload Mass (kg)";
pub const SCATTER_Y_LABEL: &str = "Landing Success (1=Success, 0=Failure)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// Empty when nothing matched.
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// One launch on the payload/outcome scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass (kg).
    pub x: f64,
    /// Success class, 0 or 1.
    pub y: f64,
    /// Marker size, proportional to payload mass.
    pub size: f64,
    /// Color group: booster version category label.
    pub category: String,
    // hover metadata
    pub flight_number: u32,
    pub booster_version: String,
    pub orbit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_ticks: Vec<f64>,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Distinct point categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.points {
            if !out.contains(&p.category.as_str()) {
                out.push(&p.category);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Count occurrences of each key, keeping first-appearance order.
fn count_in_order<I: IntoIterator<Item = String>>(keys: I) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = Vec::new();
    for key in keys {
        match slices.iter_mut().find(|s| s.label == key) {
            Some(slice) => slice.count += 1,
            None => slices.push(PieSlice { label: key, count: 1 }),
        }
    }
    slices
}

/// Landing-outcome pie.
///
/// * All sites → successful landings (class 1) counted per launch site.
/// * One site  → that site's rows split into "Failure" / "Success".
pub fn build_outcome_pie(dataset: &LaunchDataset, site: &SiteSelector) -> PieChart {
    match site {
        SiteSelector::AllSites => {
            let slices = count_in_order(
                dataset
                    .records()
                    .iter()
                    .filter(|r| r.class == SuccessClass::Success)
                    .map(|r| r.launch_site.clone()),
            );
            PieChart {
                title: "Total Successful Landings by Launch Site".to_string(),
                slices,
            }
        }
        SiteSelector::Site(name) => {
            let rows = site_rows(dataset, site);
            let slices = [SuccessClass::Failure, SuccessClass::Success]
                .into_iter()
                .map(|class| PieSlice {
                    label: class.label().to_string(),
                    count: rows.iter().filter(|r| r.class == class).count(),
                })
                .filter(|s| s.count > 0)
                .collect();
            PieChart {
                title: format!("Landing Outcome for {name}"),
                slices,
            }
        }
    }
}

/// Payload vs. landing-success scatter over the filtered rows.
pub fn build_payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelector,
    range: &PayloadRange,
) -> ScatterChart {
    let points = select_rows(dataset, site, range)
        .into_iter()
        .map(|r| ScatterPoint {
            x: r.payload_mass,
            y: f64::from(r.class.as_u8()),
            size: r.payload_mass,
            category: r.booster_category.label().to_string(),
            flight_number: r.flight_number,
            booster_version: r.booster_version.clone(),
            orbit: r.orbit.clone(),
        })
        .collect();

    let title = match site {
        SiteSelector::AllSites => {
            "Correlation Between Payload and Landing Success (All Sites)".to_string()
        }
        SiteSelector::Site(name) => {
            format!("Correlation Between Payload and Landing Success for {name}")
        }
    };

    ScatterChart {
        title,
        x_label: SCATTER_X_LABEL.to_string(),
        y_label: SCATTER_Y_LABEL.to_string(),
        y_ticks: vec![0.0, 1.0],
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_dataset;

    fn site(name: &str) -> SiteSelector {
        SiteSelector::Site(name.to_string())
    }

    #[test]
    fn all_sites_pie_counts_only_successes() {
        let ds = sample_dataset().unwrap();
        let pie = build_outcome_pie(&ds, &SiteSelector::AllSites);

        assert_eq!(pie.title, "Total Successful Landings by Launch Site");
        let successes = ds
            .records()
            .iter()
            .filter(|r| r.class == SuccessClass::Success)
            .count();
        assert_eq!(pie.total(), successes);
        // First ten flights (all failures) are at CCSFS SLC 40.
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "CCSFS SLC 40".into(), count: 45 },
                PieSlice { label: "KSC LC 39A".into(), count: 22 },
                PieSlice { label: "VAFB SLC 4E".into(), count: 13 },
            ]
        );
    }

    #[test]
    fn site_pie_partitions_into_failure_and_success() {
        let ds = sample_dataset().unwrap();
        let pie = build_outcome_pie(&ds, &site("CCSFS SLC 40"));

        assert_eq!(pie.title, "Landing Outcome for CCSFS SLC 40");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "Failure".into(), count: 10 },
                PieSlice { label: "Success".into(), count: 45 },
            ]
        );
        assert_eq!(pie.total(), 55);

        let pie = build_outcome_pie(&ds, &site("VAFB SLC 4E"));
        assert_eq!(pie.slices, vec![PieSlice { label: "Success".into(), count: 13 }]);
    }

    #[test]
    fn pie_for_unmatched_site_is_empty() {
        let ds = sample_dataset().unwrap();
        let pie = build_outcome_pie(&ds, &site("Kwajalein"));
        assert!(pie.slices.is_empty());
        assert_eq!(pie.total(), 0);
    }

    #[test]
    fn scatter_for_ccsfs_full_range() {
        let ds = sample_dataset().unwrap();
        let chart = build_payload_scatter(&ds, &site("CCSFS SLC 40"), &PayloadRange::new(0.0, 10000.0));

        assert_eq!(chart.points.len(), 55);
        assert_eq!(
            chart.title,
            "Correlation Between Payload and Landing Success for CCSFS SLC 40"
        );
        assert_eq!(chart.y_label, SCATTER_Y_LABEL);
        assert_eq!(chart.y_ticks, vec![0.0, 1.0]);

        let first = &chart.points[0];
        assert_eq!(first.flight_number, 1);
        assert_eq!(first.x, 6123.547647);
        assert_eq!(first.size, first.x);
        assert_eq!(first.y, 0.0);
        assert_eq!(first.category, "First Version");
        assert_eq!(first.orbit, "LEO");
        assert_eq!(chart.categories(), ["First Version", "Second Version"]);
    }

    #[test]
    fn scatter_all_sites_respects_range() {
        let ds = sample_dataset().unwrap();
        let chart = build_payload_scatter(&ds, &SiteSelector::AllSites, &PayloadRange::new(1000.0, 5000.0));

        assert_eq!(
            chart.title,
            "Correlation Between Payload and Landing Success (All Sites)"
        );
        // 3170, 3325, 2296, 1316, 4535, 4428
        assert_eq!(chart.points.len(), 6);
        assert!(chart.points.iter().all(|p| p.x > 1000.0 && p.x < 5000.0));
    }

    #[test]
    fn chart_spec_serializes_with_type_tag() {
        let ds = sample_dataset().unwrap();
        let spec = ChartSpec::Pie(build_outcome_pie(&ds, &site("KSC LC 39A")));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["slices"][0]["label"], "Success");
        assert_eq!(json["slices"][0]["count"], 22);
    }
}
