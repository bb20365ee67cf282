use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::SpeciesColors;
use crate::data::model::{PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Derived charts (dataset tab)
// ---------------------------------------------------------------------------

/// Bar chart of row count per species. Bar heights sum to the dataset
/// length; an empty dataset renders an empty chart.
pub fn species_count_chart(ui: &mut Ui, dataset: &PenguinDataset, colors: &SpeciesColors) {
    let counts = dataset.species_counts();

    Plot::new("species_counts")
        .legend(Legend::default())
        .height(280.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Count")
        .x_axis_formatter(|mark, _range| {
            let index = mark.value.round();
            if (mark.value - index).abs() < 1e-6
                && index >= 0.0
                && (index as usize) < Species::ALL.len()
            {
                Species::ALL[index as usize].to_string()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (i, (species, count)) in counts.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(species.as_str())
                        .color(colors.color_for(*species)),
                );
            }
        });
}

/// Scatter of bill length (x) against flipper length (y), one point set
/// per species so the legend doubles as the colour key.
pub fn bill_flipper_scatter(ui: &mut Ui, dataset: &PenguinDataset, colors: &SpeciesColors) {
    Plot::new("bill_flipper_scatter")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Bill Length (mm)")
        .y_axis_label("Flipper Length (mm)")
        .show(ui, |plot_ui| {
            for species in Species::ALL {
                let points: PlotPoints = dataset
                    .rows
                    .iter()
                    .filter(|r| r.species == species)
                    .map(|r| [r.features.bill_length_mm, r.features.flipper_length_mm])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(species.as_str())
                        .color(colors.color_for(species))
                        .radius(2.5),
                );
            }
        });
}
