use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::SpeciesColors;
use crate::data::model::PenguinDataset;

// ---------------------------------------------------------------------------
// Dataset table
// ---------------------------------------------------------------------------

const COLUMN_TITLES: [&str; 7] = [
    "Island",
    "Bill Length (mm)",
    "Bill Depth (mm)",
    "Flipper Length (mm)",
    "Body Mass (g)",
    "Sex",
    "Species",
];

/// Render the full dataset verbatim, one row per penguin.
pub fn dataset_table(ui: &mut Ui, dataset: &PenguinDataset, colors: &SpeciesColors) {
    if dataset.is_empty() {
        ui.label("Dataset is empty.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(300.0)
        .columns(Column::remainder(), COLUMN_TITLES.len())
        .header(20.0, |mut header| {
            for title in COLUMN_TITLES {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, dataset.len(), |mut row| {
                let penguin = &dataset.rows[row.index()];
                let features = &penguin.features;
                row.col(|ui| {
                    ui.label(features.island.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", features.bill_length_mm));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", features.bill_depth_mm));
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", features.flipper_length_mm));
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", features.body_mass_g));
                });
                row.col(|ui| {
                    ui.label(features.sex.as_str());
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(penguin.species.as_str())
                            .color(colors.color_for(penguin.species)),
                    );
                });
            });
        });
}
