use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;

use crate::color::ChartColors;
use crate::config::{DashboardConfig, SliderConfig};
use crate::data::loader;
use crate::data::model::LaunchDataset;
use crate::data::sample::sample_dataset;
use crate::state::DashboardState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: DashboardState,
    pub colors: ChartColors,
    /// Slider domain before widening to a particular dataset.
    pub base_slider: SliderConfig,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl LaunchDashApp {
    /// Load the configured data file, falling back to the built-in sample.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut status_message = None;
        let dataset = match &config.data_path {
            Some(path) => match loader::load_file(path) {
                Ok(ds) => {
                    log::info!("Loaded {} launches from {}", ds.len(), path.display());
                    ds
                }
                Err(e) => {
                    log::error!("Failed to load {}: {e:#}", path.display());
                    status_message = Some(format!("Error: {e:#} (showing sample data)"));
                    builtin_sample()
                }
            },
            None => builtin_sample(),
        };

        let mut app = Self::with_dataset(dataset, config.slider);
        app.status_message = status_message;
        app
    }

    pub fn with_dataset(dataset: LaunchDataset, slider: SliderConfig) -> Self {
        Self {
            colors: ChartColors::for_dataset(&dataset),
            state: DashboardState::new(dataset, slider),
            base_slider: slider,
            status_message: None,
        }
    }

    /// Replace the dataset; inputs reset to their defaults.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.colors = ChartColors::for_dataset(&dataset);
        self.state = DashboardState::new(dataset, self.base_slider);
        self.status_message = None;
    }

    pub fn open_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} (sites {:?})",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn export_charts(&mut self, path: &Path) {
        let result: Result<()> = self.state.export_charts_json().and_then(|json| {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
        });
        self.report(result, "Exported charts", path);
    }

    pub fn save_dataset(&mut self, path: &Path) {
        let result = loader::save_json(path, self.state.dataset());
        self.report(result, "Saved launches", path);
    }

    fn report(&mut self, result: Result<()>, what: &str, path: &Path) {
        match result {
            Ok(()) => {
                log::info!("{what} to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("{what} failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn builtin_sample() -> LaunchDataset {
    sample_dataset().unwrap_or_else(|e| {
        log::error!("Built-in sample is invalid: {e}");
        LaunchDataset::default()
    })
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, self);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, self);
            });

        // ---- Central panel: charts + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset().is_empty() {
                plot::empty_notice(ui);
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("SpaceX Falcon 9 Landing Prediction Dashboard");
                    });
                    ui.separator();
                    plot::pie_chart(ui, self.state.pie(), &self.colors);
                    ui.separator();
                    plot::scatter_chart(ui, self.state.scatter(), &self.colors, &self.state.slider);
                    ui.separator();
                    table::launch_table(ui, &self.state.visible_rows());
                });
        });
    }
}
