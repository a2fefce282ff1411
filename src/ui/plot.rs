use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    self, Align2, Color32, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2, pos2, vec2,
};
use egui_plot::{GridMark, Legend, MarkerShape, Plot, Points};

use crate::chart::{PieChart, ScatterChart, ScatterPoint};
use crate::color::ChartColors;
use crate::config::SliderConfig;

const PIE_HEIGHT: f32 = 300.0;
const SCATTER_HEIGHT: f32 = 360.0;
const MIN_MARKER_RADIUS: f32 = 2.5;
const MAX_MARKER_RADIUS: f32 = 12.0;

// ---------------------------------------------------------------------------
// Pie chart (painted directly; egui_plot has no pie)
// ---------------------------------------------------------------------------

/// Index of the slice covering `offset` radians, measured clockwise from
/// 12 o'clock.
pub fn slice_at(pie: &PieChart, offset: f32) -> Option<usize> {
    let total = pie.total();
    if total == 0 {
        return None;
    }
    let offset = offset.rem_euclid(TAU);
    let mut end = 0.0;
    for (i, slice) in pie.slices.iter().enumerate() {
        end += slice.count as f32 / total as f32 * TAU;
        if offset < end {
            return Some(i);
        }
    }
    pie.slices.len().checked_sub(1)
}

fn sector(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Shape {
    let steps = ((sweep / TAU) * 128.0).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let a = start + sweep * i as f32 / steps as f32;
        mesh.colored_vertex(center + Vec2::angled(a) * radius, color);
    }
    for i in 1..=steps {
        mesh.add_triangle(0, i, i + 1);
    }
    Shape::mesh(mesh)
}

pub fn pie_chart(ui: &mut Ui, pie: &PieChart, colors: &ChartColors) {
    ui.strong(pie.title.as_str());

    let total = pie.total();
    if total == 0 {
        ui.label("No launches match the selected site.");
        return;
    }

    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), PIE_HEIGHT), Sense::hover());
    let rect = response.rect;
    let radius = (rect.height() / 2.0 - 10.0).min(rect.width() / 4.0).max(10.0);
    let center = pos2(rect.left() + radius + 20.0, rect.center().y);

    let mut start = -FRAC_PI_2;
    for slice in &pie.slices {
        let frac = slice.count as f32 / total as f32;
        let sweep = frac * TAU;
        painter.add(sector(center, radius, start, sweep, colors.slice_color(&slice.label)));
        if frac >= 0.04 {
            let mid = start + sweep / 2.0;
            painter.text(
                center + Vec2::angled(mid) * radius * 0.65,
                Align2::CENTER_CENTER,
                format!("{:.1}%", frac * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }
    if pie.slices.len() > 1 {
        // separators
        let mut a = -FRAC_PI_2;
        for slice in &pie.slices {
            painter.line_segment(
                [center, center + Vec2::angled(a) * radius],
                Stroke::new(1.5, ui.visuals().panel_fill),
            );
            a += slice.count as f32 / total as f32 * TAU;
        }
    }

    // Legend to the right of the pie.
    let text_color = ui.visuals().text_color();
    let x = center.x + radius + 40.0;
    let mut y = center.y - pie.slices.len() as f32 * 11.0;
    for slice in &pie.slices {
        painter.rect_filled(
            Rect::from_min_size(pos2(x, y), vec2(12.0, 12.0)),
            2.0,
            colors.slice_color(&slice.label),
        );
        painter.text(
            pos2(x + 18.0, y + 6.0),
            Align2::LEFT_CENTER,
            format!("{}  ({})", slice.label, slice.count),
            FontId::proportional(14.0),
            text_color,
        );
        y += 22.0;
    }

    if let Some(pos) = response.hover_pos() {
        let rel = pos - center;
        if rel.length() <= radius {
            let offset = rel.y.atan2(rel.x) + FRAC_PI_2;
            if let Some(i) = slice_at(pie, offset) {
                let slice = &pie.slices[i];
                let pct = slice.count as f32 / total as f32 * 100.0;
                response.on_hover_text_at_pointer(format!(
                    "{}\n{} launches ({pct:.1}%)",
                    slice.label, slice.count
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload scatter (egui_plot)
// ---------------------------------------------------------------------------

/// Marker radius in points, area-scaled against the largest payload.
pub fn marker_radius(size: f64, max_size: f64) -> f32 {
    if max_size <= 0.0 {
        return MIN_MARKER_RADIUS;
    }
    let t = (size / max_size).clamp(0.0, 1.0).sqrt() as f32;
    MIN_MARKER_RADIUS + t * (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS)
}

/// The point of `category` nearest to `(x, y)` in normalised plot units.
pub fn nearest_point<'a>(chart: &'a ScatterChart, category: &str, x: f64, y: f64) -> Option<&'a ScatterPoint> {
    let x_span = chart
        .points
        .iter()
        .map(|p| p.x)
        .fold(1.0_f64, f64::max);
    chart
        .points
        .iter()
        .filter(|p| p.category == category)
        .min_by(|a, b| {
            let da = ((a.x - x) / x_span).powi(2) + (a.y - y).powi(2);
            let db = ((b.x - x) / x_span).powi(2) + (b.y - y).powi(2);
            da.total_cmp(&db)
        })
}

fn hover_text(chart: &ScatterChart, name: &str, x: f64, y: f64) -> String {
    match nearest_point(chart, name, x, y) {
        Some(p) => format!(
            "{}\nFlight {}  ·  {}  ·  {}\nPayload {:.0} kg, class {}",
            p.category, p.flight_number, p.booster_version, p.orbit, p.x, p.y
        ),
        None => format!("{x:.0} kg"),
    }
}

pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, colors: &ChartColors, slider: &SliderConfig) {
    ui.strong(chart.title.as_str());

    let max_size = chart.points.iter().map(|p| p.size).fold(0.0, f64::max);
    let y_ticks = chart.y_ticks.clone();
    let x_marks = slider.marks();
    let x_step = slider.step;

    Plot::new("payload_scatter")
        .height(SCATTER_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_x(slider.min)
        .include_x(slider.max)
        .include_y(-0.25)
        .include_y(1.25)
        .x_grid_spacer(move |_| {
            x_marks
                .iter()
                .map(|&value| GridMark { value, step_size: x_step })
                .collect()
        })
        .y_grid_spacer(move |_| {
            y_ticks
                .iter()
                .map(|&value| GridMark { value, step_size: 1.0 })
                .collect()
        })
        .label_formatter(|name, value| hover_text(chart, name, value.x, value.y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for category in chart.categories() {
                let color = colors.boosters.color_for(category);
                for p in chart.points.iter().filter(|p| p.category == category) {
                    plot_ui.points(
                        Points::new(vec![[p.x, p.y]])
                            .name(category)
                            .color(color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(marker_radius(p.size, max_size)),
                    );
                }
            }
        });

    if chart.points.is_empty() {
        ui.label("No launches in the selected payload range.");
    }
}

// ---------------------------------------------------------------------------
// Placeholder when nothing is loaded
// ---------------------------------------------------------------------------

pub fn empty_notice(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(egui::RichText::new("No launches loaded  (File → Open…)").weak());
    });
}
