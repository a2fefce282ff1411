/// egui presentation: top bar, input panel, charts, launch table.
pub mod panels;
pub mod plot;
pub mod table;
