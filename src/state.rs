use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Result;

use crate::color::SpeciesColors;
use crate::data::loader;
use crate::data::model::{Island, PenguinDataset, PenguinRecord, Sex, Species};
use crate::pipeline::{Pipeline, Predictor};
use crate::ui::effects::Snowfall;

// ---------------------------------------------------------------------------
// Bundled asset locations
// ---------------------------------------------------------------------------

pub const DATASET_PATH: &str = "assets/penguins.csv";
pub const PIPELINE_PATH: &str = "assets/penguin_pipeline.json";

// ---------------------------------------------------------------------------
// Input form bounds
// ---------------------------------------------------------------------------

pub const BILL_LENGTH_RANGE: RangeInclusive<f64> = 20.0..=80.0;
pub const BILL_DEPTH_RANGE: RangeInclusive<f64> = 10.0..=25.0;
pub const FLIPPER_LENGTH_RANGE: RangeInclusive<f64> = 150.0..=250.0;
pub const BODY_MASS_RANGE: RangeInclusive<i32> = 2500..=7000;

pub const BILL_STEP: f64 = 0.5;
pub const FLIPPER_STEP: f64 = 10.0;
pub const BODY_MASS_STEP: f64 = 100.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Summary,
    Dataset,
    Model,
}

/// Current values of the six prediction form controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    pub island: Island,
    pub bill_length_mm: f64,
    pub bill_depth_mm: f64,
    pub flipper_length_mm: f64,
    pub body_mass_g: i32,
    pub sex: Sex,
}

impl Default for PredictionForm {
    fn default() -> Self {
        PredictionForm {
            island: Island::Torgersen,
            bill_length_mm: *BILL_LENGTH_RANGE.start(),
            bill_depth_mm: *BILL_DEPTH_RANGE.start(),
            flipper_length_mm: 200.0,
            body_mass_g: 4000,
            sex: Sex::Male,
        }
    }
}

impl PredictionForm {
    /// Assemble the current control values into a single input record.
    /// Rebuilt every frame so it always reflects the latest control state.
    pub fn record(&self) -> PenguinRecord {
        PenguinRecord {
            island: self.island,
            bill_length_mm: self.bill_length_mm,
            bill_depth_mm: self.bill_depth_mm,
            flipper_length_mm: self.flipper_length_mm,
            body_mass_g: f64::from(self.body_mass_g),
            sex: self.sex,
        }
    }
}

/// Run a single synchronous prediction over the form's current record.
pub fn run_prediction(form: &PredictionForm, predictor: &dyn Predictor) -> Species {
    let input = form.record();
    let species = predictor.predict(&input);
    log::info!("predicted {species} for {input:?}");
    species
}

// ---------------------------------------------------------------------------
// Startup-loaded singletons
// ---------------------------------------------------------------------------

/// The two read-once resources plus the shared species colour map.
///
/// Loaded exactly once at startup and passed by reference into the views;
/// nothing re-reads the files afterwards.
pub struct AppData {
    pub dataset: PenguinDataset,
    pub pipeline: Pipeline,
    pub colors: SpeciesColors,
}

impl AppData {
    pub fn load() -> Result<Self> {
        let dataset = loader::load_dataset(Path::new(DATASET_PATH))?;
        log::info!("loaded {} penguins from {DATASET_PATH}", dataset.len());

        let pipeline = Pipeline::load(Path::new(PIPELINE_PATH))?;
        log::info!(
            "pipeline ready with {} classes from {PIPELINE_PATH}",
            pipeline.classes().len()
        );

        Ok(AppData {
            dataset,
            pipeline,
            colors: SpeciesColors::new(),
        })
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded resources; `None` when startup failed.
    pub data: Option<AppData>,

    /// Fatal startup error shown instead of the dashboard.
    pub load_error: Option<String>,

    /// Which tab is active.
    pub tab: Tab,

    /// The six prediction form controls.
    pub form: PredictionForm,

    /// Result of the most recent prediction, if any.
    pub prediction: Option<Species>,

    /// Decorative snowfall triggered by a prediction.
    pub snow: Snowfall,
}

impl AppState {
    /// Load the dataset and pipeline once and build the initial state.
    pub fn startup() -> Self {
        let (data, load_error) = match AppData::load() {
            Ok(data) => (Some(data), None),
            Err(e) => {
                log::error!("startup failed: {e:#}");
                (None, Some(format!("{e:#}")))
            }
        };

        AppState {
            data,
            load_error,
            tab: Tab::default(),
            form: PredictionForm::default(),
            prediction: None,
            snow: Snowfall::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct StubPredictor {
        species: Species,
        calls: Cell<usize>,
    }

    impl StubPredictor {
        fn new(species: Species) -> Self {
            StubPredictor {
                species,
                calls: Cell::new(0),
            }
        }
    }

    impl Predictor for StubPredictor {
        fn predict(&self, _record: &PenguinRecord) -> Species {
            self.calls.set(self.calls.get() + 1);
            self.species
        }
    }

    #[test]
    fn form_defaults_match_the_control_domains() {
        let form = PredictionForm::default();
        assert_eq!(form.island, Island::Torgersen);
        assert_eq!(form.bill_length_mm, 20.0);
        assert_eq!(form.bill_depth_mm, 10.0);
        assert_eq!(form.flipper_length_mm, 200.0);
        assert_eq!(form.body_mass_g, 4000);
        assert_eq!(form.sex, Sex::Male);
    }

    #[test]
    fn record_assembles_all_six_fields() {
        let form = PredictionForm {
            island: Island::Biscoe,
            bill_length_mm: 45.0,
            bill_depth_mm: 15.0,
            flipper_length_mm: 210.0,
            body_mass_g: 5000,
            sex: Sex::Male,
        };

        assert_eq!(
            form.record(),
            PenguinRecord {
                island: Island::Biscoe,
                bill_length_mm: 45.0,
                bill_depth_mm: 15.0,
                flipper_length_mm: 210.0,
                body_mass_g: 5000.0,
                sex: Sex::Male,
            }
        );
    }

    #[test]
    fn bill_length_bounds_are_accepted_unclamped() {
        for bound in [20.0, 80.0] {
            assert!(BILL_LENGTH_RANGE.contains(&bound));
            let form = PredictionForm {
                bill_length_mm: bound,
                ..PredictionForm::default()
            };
            assert_eq!(form.record().bill_length_mm, bound);
        }
    }

    #[test]
    fn run_prediction_calls_the_predictor_exactly_once() {
        let stub = StubPredictor::new(Species::Gentoo);
        let species = run_prediction(&PredictionForm::default(), &stub);
        assert_eq!(species, Species::Gentoo);
        assert_eq!(stub.calls.get(), 1);
    }
}
