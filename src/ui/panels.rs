use eframe::egui::{self, Color32, RichText, Ui, vec2};

use crate::app::LaunchDashApp;
use crate::data::filter::{ALL_SITES, PayloadRange, SiteSelector};
use crate::data::sample::sample_dataset;
use crate::state::{InputEvent, InputId};

// ---------------------------------------------------------------------------
// Left side panel – dashboard inputs
// ---------------------------------------------------------------------------

/// Keep `low ≤ high` after one of the two slider handles moved.
pub fn order_handles(low: f64, high: f64, low_moved: bool) -> PayloadRange {
    if low <= high {
        PayloadRange { low, high }
    } else if low_moved {
        PayloadRange { low, high: low }
    } else {
        PayloadRange { low: high, high }
    }
}

/// Dropdown values: the "All Sites" sentinel followed by each known site.
pub fn site_options(sites: &[String]) -> Vec<String> {
    std::iter::once(ALL_SITES.to_string())
        .chain(sites.iter().cloned())
        .collect()
}

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, app: &mut LaunchDashApp) {
    ui.heading("Inputs");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch site");
    let options = site_options(app.state.dataset().sites());
    let current = app.state.site().as_str().to_string();
    let mut selected = current.clone();
    egui::ComboBox::from_id_salt(InputId::SiteDropdown.as_str())
        .selected_text(selected.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                ui.selectable_value(&mut selected, option.clone(), option.as_str());
            }
        });
    if selected != current {
        app.state
            .handle(InputEvent::SiteChanged(SiteSelector::parse(&selected)));
    }

    ui.add_space(8.0);

    // ---- Payload range: two handles ----
    ui.strong("Payload range (kg)");
    let slider = app.state.slider;
    let PayloadRange { mut low, mut high } = app.state.payload();
    let low_moved = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                .text("min")
                .suffix(" kg"),
        )
        .changed();
    let high_moved = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .text("max")
                .suffix(" kg"),
        )
        .changed();
    if low_moved || high_moved {
        let range = order_handles(low, high, low_moved);
        app.state.handle(InputEvent::PayloadChanged(range));
    }
    if ui.small_button("Reset to data bounds").clicked() {
        let (min, max) = app.state.dataset().payload_bounds();
        app.state.handle(InputEvent::PayloadChanged(PayloadRange::new(min, max)));
    }

    ui.separator();

    // ---- Booster version legend ----
    ui.strong("Booster version");
    for (label, color) in app.colors.boosters.legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(label);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, app: &mut LaunchDashApp) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(app);
                ui.close_menu();
            }
            if ui.button("Load sample data").clicked() {
                match sample_dataset() {
                    Ok(ds) => app.set_dataset(ds),
                    Err(e) => app.status_message = Some(format!("Error: {e}")),
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export charts…").clicked() {
                if let Some(path) = save_dialog("Export chart specs", "charts.json") {
                    app.export_charts(&path);
                }
                ui.close_menu();
            }
            if ui.button("Save launches as JSON…").clicked() {
                if let Some(path) = save_dialog("Save launches", "launches.json") {
                    app.save_dataset(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in scatter",
            app.state.dataset().len(),
            app.state.scatter().points.len()
        ));

        if let Some(msg) = &app.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(app: &mut LaunchDashApp) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch data")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        app.open_path(&path);
    }
}

fn save_dialog(title: &str, file_name: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .set_file_name(file_name)
        .add_filter("JSON", &["json"])
        .save_file()
}
