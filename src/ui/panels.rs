use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppData, AppState, Tab};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, tab selector, dataset status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Penguin Classifier");
        ui.separator();

        ui.selectable_value(&mut state.tab, Tab::Summary, "Summary");
        ui.selectable_value(&mut state.tab, Tab::Dataset, "Dataset");
        ui.selectable_value(&mut state.tab, Tab::Model, "Model");

        ui.separator();

        if let Some(data) = &state.data {
            ui.label(format!("{} penguins loaded", data.dataset.len()));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary tab
// ---------------------------------------------------------------------------

const INTRO: &str = "Penguins are flightless seabirds of the southern \
oceans. The three species in this dataset breed on the islands of the \
Palmer Archipelago off the Antarctic Peninsula, where they hunt krill and \
small fish in the surrounding waters. Although clumsy on land, all three \
are fast, agile swimmers, and each species can be told apart by its bill \
shape, flipper length, and body mass.";

const ADELIE: &str = "The smallest of the three, with a short stubby bill \
and the classic black-and-white tuxedo look. Adelies breed on all three \
islands in the archipelago and travel long distances to feed, almost \
exclusively on krill.";

const CHINSTRAP: &str = "Named for the thin black band running under its \
chin, the chinstrap penguin nests in rocky colonies on Dream Island. It is \
close to the Adelie in size but has a noticeably longer bill.";

const GENTOO: &str = "The largest species here, recognisable by the white \
patch above its eye and its bright orange bill. Gentoos on Biscoe Island \
are excellent divers, with longer flippers and roughly a kilogram more \
body mass than the other two species.";

/// Static informational panel: picture plus species descriptions.
pub fn summary_panel(ui: &mut Ui) {
    let picture = egui::include_image!("../../assets/penguins.png");

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(picture)
                    .max_width(ui.available_width() * 0.6)
                    .max_height(260.0)
                    .rounding(4.0),
            );
        });
        ui.add_space(8.0);

        ui.heading("Penguins");
        ui.label(INTRO);
        ui.add_space(6.0);

        ui.strong("Adelie");
        ui.label(ADELIE);
        ui.add_space(6.0);

        ui.strong("Chinstrap");
        ui.label(CHINSTRAP);
        ui.add_space(6.0);

        ui.strong("Gentoo");
        ui.label(GENTOO);
    });
}

// ---------------------------------------------------------------------------
// Dataset tab
// ---------------------------------------------------------------------------

/// Full table on top, the two derived charts side by side below.
pub fn dataset_panel(ui: &mut Ui, data: &AppData) {
    table::dataset_table(ui, &data.dataset, &data.colors);
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Penguins per Species");
        plot::species_count_chart(&mut cols[0], &data.dataset, &data.colors);

        cols[1].strong("Bill Length vs Flipper Length");
        plot::bill_flipper_scatter(&mut cols[1], &data.dataset, &data.colors);
    });
}

// ---------------------------------------------------------------------------
// Fatal startup error
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when an asset failed to load.
pub fn load_error_panel(ui: &mut Ui, message: &str) {
    ui.add_space(ui.available_height() * 0.3);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Failed to start");
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(Color32::RED));
        ui.add_space(8.0);
        ui.label("Fix the bundled assets and restart the application.");
    });
}
