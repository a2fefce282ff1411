use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::{ChartSpec, PieChart, ScatterChart, build_outcome_pie, build_payload_scatter};
use crate::config::SliderConfig;
use crate::data::filter::{PayloadRange, SiteSelector, select_rows};
use crate::data::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Bound inputs and their events
// ---------------------------------------------------------------------------

/// The two widgets the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

impl InputId {
    pub fn as_str(self) -> &'static str {
        match self {
            InputId::SiteDropdown => "site-dropdown",
            InputId::PayloadSlider => "payload-slider",
        }
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SiteChanged(SiteSelector),
    PayloadChanged(PayloadRange),
}

impl InputEvent {
    pub fn source(&self) -> InputId {
        match self {
            InputEvent::SiteChanged(_) => InputId::SiteDropdown,
            InputEvent::PayloadChanged(_) => InputId::PayloadSlider,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state – the reactive controller
// ---------------------------------------------------------------------------

/// Current inputs, the dataset they apply to, and the chart specs derived
/// from them.  Every handler runs to completion before returning, so the
/// charts always reflect the latest inputs.
pub struct DashboardState {
    dataset: LaunchDataset,

    site: SiteSelector,
    payload: PayloadRange,

    pie: PieChart,
    scatter: ScatterChart,

    /// Bumped on every pie / scatter rebuild.
    pie_revision: u64,
    scatter_revision: u64,

    /// Slider domain, widened to cover the dataset.
    pub slider: SliderConfig,
}

#[derive(Serialize)]
struct ChartExport<'a> {
    site: &'a str,
    payload_range: [f64; 2],
    charts: [ChartSpec; 2],
}

impl DashboardState {
    /// Take ownership of the dataset, apply default inputs (all sites, full
    /// payload span) and compute both charts once.
    pub fn new(dataset: LaunchDataset, slider: SliderConfig) -> Self {
        let (min, max) = dataset.payload_bounds();
        let site = SiteSelector::AllSites;
        let payload = PayloadRange::new(min, max);
        let pie = build_outcome_pie(&dataset, &site);
        let scatter = build_payload_scatter(&dataset, &site, &payload);

        log::info!(
            "Dashboard ready: {} launches, {} sites, payload {min}..{max} kg",
            dataset.len(),
            dataset.sites().len()
        );

        Self {
            slider: slider.widened_to(min, max),
            dataset,
            site,
            payload,
            pie,
            scatter,
            pie_revision: 1,
            scatter_revision: 1,
        }
    }

    /// Dispatch an input change to its handler.
    pub fn handle(&mut self, event: InputEvent) {
        log::debug!("input {} changed: {event:?}", event.source());
        match event {
            InputEvent::SiteChanged(site) => self.on_site_changed(site),
            InputEvent::PayloadChanged(range) => self.on_payload_changed(range),
        }
    }

    /// Site dropdown: both charts depend on the site.
    fn on_site_changed(&mut self, site: SiteSelector) {
        if site == self.site {
            return;
        }
        if let SiteSelector::Site(name) = &site {
            if !self.dataset.contains_site(name) {
                log::warn!("site '{name}' has no launches in this dataset");
            }
        }
        self.site = site;
        self.rebuild_pie();
        self.rebuild_scatter();
    }

    /// Payload slider: only the scatter depends on the payload range.
    fn on_payload_changed(&mut self, range: PayloadRange) {
        let range = PayloadRange::new(range.low, range.high);
        if range == self.payload {
            return;
        }
        self.payload = range;
        self.rebuild_scatter();
    }

    fn rebuild_pie(&mut self) {
        self.pie = build_outcome_pie(&self.dataset, &self.site);
        self.pie_revision += 1;
        log::debug!(
            "pie rebuilt (rev {}): {} slices, {} launches",
            self.pie_revision,
            self.pie.slices.len(),
            self.pie.total()
        );
    }

    fn rebuild_scatter(&mut self) {
        self.scatter = build_payload_scatter(&self.dataset, &self.site, &self.payload);
        self.scatter_revision += 1;
        log::debug!(
            "scatter rebuilt (rev {}): {} points",
            self.scatter_revision,
            self.scatter.points.len()
        );
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site(&self) -> &SiteSelector {
        &self.site
    }

    pub fn payload(&self) -> PayloadRange {
        self.payload
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    pub fn pie_revision(&self) -> u64 {
        self.pie_revision
    }

    pub fn scatter_revision(&self) -> u64 {
        self.scatter_revision
    }

    /// Rows behind the scatter chart, for the table view.
    pub fn visible_rows(&self) -> Vec<&LaunchRecord> {
        select_rows(&self.dataset, &self.site, &self.payload)
    }

    /// Current inputs and both chart specs as pretty JSON.
    pub fn export_charts_json(&self) -> Result<String> {
        let export = ChartExport {
            site: self.site.as_str(),
            payload_range: [self.payload.low, self.payload.high],
            charts: [
                ChartSpec::Pie(self.pie.clone()),
                ChartSpec::Scatter(self.scatter.clone()),
            ],
        };
        serde_json::to_string_pretty(&export).context("serializing chart specs")
    }
}
