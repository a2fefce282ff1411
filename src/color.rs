use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{BoosterCategory, LaunchDataset, SuccessClass};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Assigns each category label (launch site, outcome, booster version) a
/// stable colour, in the order the labels were given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut order: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            if !order.iter().any(|l| l == label) {
                order.push(label.to_string());
            }
        }
        let palette = generate_palette(order.len());
        let mapping = order.iter().cloned().zip(palette).collect();

        ColorMap {
            order,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) in insertion order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|l| (l.clone(), self.color_for(l)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Per-chart colour maps
// ---------------------------------------------------------------------------

/// Colours for every label the two charts can show.
#[derive(Debug, Clone)]
pub struct ChartColors {
    pub sites: ColorMap,
    pub outcomes: ColorMap,
    pub boosters: ColorMap,
}

impl ChartColors {
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        let outcomes = [SuccessClass::Failure, SuccessClass::Success].map(SuccessClass::label);
        let boosters = BoosterCategory::ALL.map(BoosterCategory::label);
        ChartColors {
            sites: ColorMap::new(dataset.sites()),
            outcomes: ColorMap::new(&outcomes),
            boosters: ColorMap::new(&boosters),
        }
    }

    /// Pie slices are labelled either by site or by outcome.
    pub fn slice_color(&self, label: &str) -> Color32 {
        if self.outcomes.legend_entries().iter().any(|(l, _)| l == label) {
            self.outcomes.color_for(label)
        } else {
            self.sites.color_for(label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn duplicate_labels_share_a_colour() {
        let cm = ColorMap::new(&["Success", "Failure", "Success"]);
        let legend = cm.legend_entries();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].0, "Success");
        assert_eq!(cm.color_for("Success"), legend[0].1);
        assert_eq!(cm.color_for("Unknown"), Color32::GRAY);
    }

    #[test]
    fn chart_colors_cover_sites_and_outcomes() {
        let ds = crate::data::sample::sample_dataset().unwrap();
        let colors = ChartColors::for_dataset(&ds);
        assert_eq!(colors.sites.legend_entries().len(), 3);
        assert_eq!(colors.boosters.legend_entries()[2].0, "Latest Version");
        assert_eq!(colors.slice_color("Success"), colors.outcomes.color_for("Success"));
        assert_eq!(colors.slice_color("KSC LC 39A"), colors.sites.color_for("KSC LC 39A"));
    }
}
