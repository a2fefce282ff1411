use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::LaunchRecord;

const HEADERS: [&str; 8] = [
    "Flight", "Site", "Payload (kg)", "Orbit", "Outcome", "Serial", "Booster", "Class",
];

/// Scrollable table of the launches currently behind the scatter chart.
pub fn launch_table(ui: &mut Ui, rows: &[&LaunchRecord]) {
    ui.strong(format!("Selected launches ({})", rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .max_scroll_height(260.0)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(50.0))
        .columns(Column::auto().at_least(70.0), HEADERS.len() - 2)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let rec = rows[row.index()];
                row.col(|ui| {
                    ui.label(rec.flight_number.to_string());
                });
                row.col(|ui| {
                    ui.label(rec.launch_site.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass));
                });
                row.col(|ui| {
                    ui.label(rec.orbit.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.outcome.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.serial.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.booster_category.label());
                });
                row.col(|ui| {
                    ui.label(rec.class.label());
                });
            });
        });
}
