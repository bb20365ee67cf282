use eframe::egui::{self, ComboBox, DragValue, Slider, Ui};

use crate::data::model::{Island, Sex, Species};
use crate::state::{
    self, AppData, PredictionForm, BILL_DEPTH_RANGE, BILL_LENGTH_RANGE, BILL_STEP,
    BODY_MASS_RANGE, BODY_MASS_STEP, FLIPPER_LENGTH_RANGE, FLIPPER_STEP,
};
use crate::ui::effects::Snowfall;

// ---------------------------------------------------------------------------
// Model tab: input form + prediction result
// ---------------------------------------------------------------------------

/// Controls on the left, the latest prediction on the right.
pub fn model_panel(
    ui: &mut Ui,
    data: &AppData,
    form: &mut PredictionForm,
    prediction: &mut Option<Species>,
    snow: &mut Snowfall,
) {
    ui.columns(2, |cols: &mut [Ui]| {
        form_controls(&mut cols[0], form);
        cols[0].add_space(12.0);

        if cols[0].button("Predict!").clicked() {
            *prediction = Some(state::run_prediction(form, &data.pipeline));
            let now = cols[0].input(|i| i.time);
            snow.start(now);
        }

        result_panel(&mut cols[1], *prediction);
    });
}

fn form_controls(ui: &mut Ui, form: &mut PredictionForm) {
    ui.strong("Measurements");
    ui.add_space(4.0);

    ComboBox::from_label("Island")
        .selected_text(form.island.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for island in Island::ALL {
                ui.selectable_value(&mut form.island, island, island.as_str());
            }
        });

    ui.add(
        Slider::new(&mut form.bill_length_mm, BILL_LENGTH_RANGE)
            .step_by(BILL_STEP)
            .text("Bill Length (mm)"),
    );
    ui.add(
        Slider::new(&mut form.bill_depth_mm, BILL_DEPTH_RANGE)
            .step_by(BILL_STEP)
            .text("Bill Depth (mm)"),
    );

    ui.horizontal(|ui: &mut Ui| {
        ui.add(
            DragValue::new(&mut form.flipper_length_mm)
                .range(FLIPPER_LENGTH_RANGE)
                .speed(FLIPPER_STEP)
                .max_decimals(0),
        );
        ui.label("Flipper Length (mm)");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.add(
            DragValue::new(&mut form.body_mass_g)
                .range(BODY_MASS_RANGE)
                .speed(BODY_MASS_STEP),
        );
        ui.label("Body Mass (g)");
    });

    ui.horizontal(|ui: &mut Ui| {
        for sex in Sex::ALL {
            ui.radio_value(&mut form.sex, sex, sex.as_str());
        }
        ui.label("Sex");
    });
}

fn result_panel(ui: &mut Ui, prediction: Option<Species>) {
    match prediction {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Set the measurements and press Predict!");
            });
        }
        Some(species) => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(header_text(species));
                ui.add_space(8.0);
                ui.add(
                    egui::Image::new(species_image(species))
                        .max_width(ui.available_width() * 0.8)
                        .rounding(4.0),
                );
            });
        }
    }
}

/// Header shown above the species picture.
pub fn header_text(species: Species) -> String {
    format!("It is a/an {species}!")
}

/// The species → picture mapping, total over the closed species set.
pub fn species_image(species: Species) -> egui::ImageSource<'static> {
    match species {
        Species::Adelie => egui::include_image!("../../assets/adelie.png"),
        Species::Chinstrap => egui::include_image!("../../assets/chinstrap.png"),
        Species::Gentoo => egui::include_image!("../../assets/gentoo.png"),
    }
}
