use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::artifact::{self, PipelineArtifact};
use crate::data::model::{Island, PenguinRecord, Sex, Species, FEATURE_NAMES};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Validation failures when building a [`Pipeline`] from an artifact.
///
/// Everything here is detected at load time so that `predict` cannot fail
/// later with a schema or label surprise.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("feature schema mismatch: artifact declares [{found}], expected [{expected}]")]
    SchemaMismatch { expected: String, found: String },

    #[error("preprocessing references unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("feature '{feature}' has a {found} encoder but needs a {expected} one")]
    WrongKind {
        feature: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("feature '{0}' has no preprocessing entry")]
    MissingEncoder(&'static str),

    #[error("categorical feature '{feature}' lists unknown category '{value}'")]
    UnknownCategory { feature: &'static str, value: String },

    #[error("categorical feature '{feature}' does not cover category '{value}'")]
    MissingCategory { feature: &'static str, value: &'static str },

    #[error("numeric feature '{feature}' has a non-positive standard deviation ({std})")]
    BadScaler { feature: &'static str, std: f64 },

    #[error("classifier declares no classes")]
    NoClasses,

    #[error("classifier declares unknown class label '{0}'")]
    UnknownClassLabel(String),

    #[error("classifier declares class '{0}' more than once")]
    DuplicateClass(String),

    #[error("classifier shape mismatch: {0}")]
    BadShape(String),
}

// ---------------------------------------------------------------------------
// Predictor seam
// ---------------------------------------------------------------------------

/// The single capability a prediction backend exposes.
pub trait Predictor {
    fn predict(&self, record: &PenguinRecord) -> Species;
}

// ---------------------------------------------------------------------------
// Typed feature encoders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericField {
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl NumericField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "bill_length_mm" => Some(NumericField::BillLength),
            "bill_depth_mm" => Some(NumericField::BillDepth),
            "flipper_length_mm" => Some(NumericField::FlipperLength),
            "body_mass_g" => Some(NumericField::BodyMass),
            _ => None,
        }
    }

    fn value(self, record: &PenguinRecord) -> f64 {
        match self {
            NumericField::BillLength => record.bill_length_mm,
            NumericField::BillDepth => record.bill_depth_mm,
            NumericField::FlipperLength => record.flipper_length_mm,
            NumericField::BodyMass => record.body_mass_g,
        }
    }
}

/// One validated preprocessing step, in schema order. Categorical encoders
/// carry their categories as parsed enums, so encoding is total.
#[derive(Debug, Clone)]
enum FeatureEncoder {
    Island { categories: Vec<Island> },
    Sex { categories: Vec<Sex> },
    Numeric { field: NumericField, mean: f64, std: f64 },
}

impl FeatureEncoder {
    fn width(&self) -> usize {
        match self {
            FeatureEncoder::Island { categories } => categories.len(),
            FeatureEncoder::Sex { categories } => categories.len(),
            FeatureEncoder::Numeric { .. } => 1,
        }
    }

    fn encode_into(&self, record: &PenguinRecord, out: &mut Vec<f64>) {
        match self {
            FeatureEncoder::Island { categories } => {
                for cat in categories {
                    out.push(if record.island == *cat { 1.0 } else { 0.0 });
                }
            }
            FeatureEncoder::Sex { categories } => {
                for cat in categories {
                    out.push(if record.sex == *cat { 1.0 } else { 0.0 });
                }
            }
            FeatureEncoder::Numeric { field, mean, std } => {
                out.push((field.value(record) - mean) / std);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// A validated, ready-to-use prediction pipeline.
#[derive(Debug)]
pub struct Pipeline {
    encoders: Vec<FeatureEncoder>,
    classes: Vec<Species>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl Pipeline {
    /// Deserialize and validate the pipeline artifact at `path`.
    pub fn load(path: &Path) -> Result<Pipeline> {
        let document = artifact::read(path)?;
        let pipeline = Pipeline::try_from(document)
            .with_context(|| format!("validating pipeline artifact {}", path.display()))?;
        Ok(pipeline)
    }

    pub fn classes(&self) -> &[Species] {
        &self.classes
    }

    fn encoded_width(&self) -> usize {
        self.encoders.iter().map(FeatureEncoder::width).sum()
    }

    fn encode(&self, record: &PenguinRecord) -> Vec<f64> {
        let mut x = Vec::with_capacity(self.encoded_width());
        for encoder in &self.encoders {
            encoder.encode_into(record, &mut x);
        }
        x
    }

    fn scores(&self, x: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + intercept
            })
            .collect()
    }
}

impl Predictor for Pipeline {
    fn predict(&self, record: &PenguinRecord) -> Species {
        let scores = self.scores(&self.encode(record));

        // Argmax; ties resolve to the lowest class index.
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

impl TryFrom<PipelineArtifact> for Pipeline {
    type Error = PipelineError;

    fn try_from(doc: PipelineArtifact) -> Result<Self, Self::Error> {
        if doc.feature_names != FEATURE_NAMES {
            return Err(PipelineError::SchemaMismatch {
                expected: FEATURE_NAMES.join(", "),
                found: doc.feature_names.join(", "),
            });
        }

        for entry in &doc.preprocessing.categorical {
            match entry.feature.as_str() {
                "island" | "sex" => {}
                other if FEATURE_NAMES.contains(&other) => {
                    return Err(PipelineError::WrongKind {
                        feature: feature_name(other),
                        expected: "numeric",
                        found: "categorical",
                    });
                }
                other => return Err(PipelineError::UnknownFeature(other.to_string())),
            }
        }
        for entry in &doc.preprocessing.numeric {
            let name = entry.feature.as_str();
            if NumericField::from_name(name).is_none() {
                if FEATURE_NAMES.contains(&name) {
                    return Err(PipelineError::WrongKind {
                        feature: feature_name(name),
                        expected: "categorical",
                        found: "numeric",
                    });
                }
                return Err(PipelineError::UnknownFeature(name.to_string()));
            }
        }

        let mut encoders = Vec::with_capacity(FEATURE_NAMES.len());
        for &name in &FEATURE_NAMES {
            encoders.push(build_encoder(&doc, name)?);
        }

        let classifier = doc.classifier;
        if classifier.classes.is_empty() {
            return Err(PipelineError::NoClasses);
        }
        let mut classes = Vec::with_capacity(classifier.classes.len());
        for label in &classifier.classes {
            let species: Species = label
                .parse()
                .map_err(|_| PipelineError::UnknownClassLabel(label.clone()))?;
            if classes.contains(&species) {
                return Err(PipelineError::DuplicateClass(label.clone()));
            }
            classes.push(species);
        }

        let width: usize = encoders.iter().map(FeatureEncoder::width).sum();
        if classifier.coefficients.len() != classes.len() {
            return Err(PipelineError::BadShape(format!(
                "{} coefficient rows for {} classes",
                classifier.coefficients.len(),
                classes.len()
            )));
        }
        for (i, row) in classifier.coefficients.iter().enumerate() {
            if row.len() != width {
                return Err(PipelineError::BadShape(format!(
                    "coefficient row {i} has {} weights, expected {width}",
                    row.len()
                )));
            }
        }
        if classifier.intercepts.len() != classes.len() {
            return Err(PipelineError::BadShape(format!(
                "{} intercepts for {} classes",
                classifier.intercepts.len(),
                classes.len()
            )));
        }

        Ok(Pipeline {
            encoders,
            classes,
            coefficients: classifier.coefficients,
            intercepts: classifier.intercepts,
        })
    }
}

/// Map a feature string back to its `'static` schema name.
fn feature_name(name: &str) -> &'static str {
    FEATURE_NAMES
        .iter()
        .find(|&&f| f == name)
        .copied()
        .unwrap_or("?")
}

fn build_encoder(doc: &PipelineArtifact, name: &'static str) -> Result<FeatureEncoder, PipelineError> {
    if name == "island" {
        let entry = doc
            .preprocessing
            .categorical
            .iter()
            .find(|e| e.feature == name)
            .ok_or(PipelineError::MissingEncoder(name))?;
        let mut categories = Vec::with_capacity(entry.categories.len());
        for cat in &entry.categories {
            let island: Island = cat.parse().map_err(|_| PipelineError::UnknownCategory {
                feature: name,
                value: cat.clone(),
            })?;
            categories.push(island);
        }
        for required in Island::ALL {
            if !categories.contains(&required) {
                return Err(PipelineError::MissingCategory {
                    feature: name,
                    value: required.as_str(),
                });
            }
        }
        return Ok(FeatureEncoder::Island { categories });
    }

    if name == "sex" {
        let entry = doc
            .preprocessing
            .categorical
            .iter()
            .find(|e| e.feature == name)
            .ok_or(PipelineError::MissingEncoder(name))?;
        let mut categories = Vec::with_capacity(entry.categories.len());
        for cat in &entry.categories {
            let sex: Sex = cat.parse().map_err(|_| PipelineError::UnknownCategory {
                feature: name,
                value: cat.clone(),
            })?;
            categories.push(sex);
        }
        for required in Sex::ALL {
            if !categories.contains(&required) {
                return Err(PipelineError::MissingCategory {
                    feature: name,
                    value: required.as_str(),
                });
            }
        }
        return Ok(FeatureEncoder::Sex { categories });
    }

    let field = NumericField::from_name(name).ok_or(PipelineError::MissingEncoder(name))?;
    let entry = doc
        .preprocessing
        .numeric
        .iter()
        .find(|e| e.feature == name)
        .ok_or(PipelineError::MissingEncoder(name))?;
    if !(entry.std.is_finite() && entry.std > 0.0) {
        return Err(PipelineError::BadScaler {
            feature: name,
            std: entry.std,
        });
    }
    Ok(FeatureEncoder::Numeric {
        field,
        mean: entry.mean,
        std: entry.std,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Island, Sex};

    /// A well-formed artifact with round numbers and an island-keyed
    /// classifier (Torgersen→Adelie, Dream→Chinstrap, Biscoe→Gentoo).
    fn artifact_json() -> serde_json::Value {
        serde_json::json!({
            "feature_names": [
                "island", "bill_length_mm", "bill_depth_mm",
                "flipper_length_mm", "body_mass_g", "sex"
            ],
            "preprocessing": {
                "categorical": [
                    {"feature": "island", "categories": ["Biscoe", "Dream", "Torgersen"]},
                    {"feature": "sex", "categories": ["Female", "Male"]}
                ],
                "numeric": [
                    {"feature": "bill_length_mm", "mean": 40.0, "std": 5.0},
                    {"feature": "bill_depth_mm", "mean": 15.0, "std": 2.5},
                    {"feature": "flipper_length_mm", "mean": 200.0, "std": 20.0},
                    {"feature": "body_mass_g", "mean": 4000.0, "std": 500.0}
                ]
            },
            "classifier": {
                "classes": ["Adelie", "Chinstrap", "Gentoo"],
                "coefficients": [
                    [0.0, 0.0, 1.0,  0.0, 0.0, 0.0, 0.0,  0.0, 0.0],
                    [0.0, 1.0, 0.0,  0.0, 0.0, 0.0, 0.0,  0.0, 0.0],
                    [1.0, 0.0, 0.0,  0.0, 0.0, 0.0, 0.0,  0.0, 0.0]
                ],
                "intercepts": [0.0, 0.0, 0.0]
            }
        })
    }

    fn pipeline_from(value: serde_json::Value) -> Result<Pipeline, PipelineError> {
        let doc: PipelineArtifact = serde_json::from_value(value).expect("artifact deserializes");
        Pipeline::try_from(doc)
    }

    fn record(island: Island) -> PenguinRecord {
        PenguinRecord {
            island,
            bill_length_mm: 45.0,
            bill_depth_mm: 15.0,
            flipper_length_mm: 210.0,
            body_mass_g: 5000.0,
            sex: Sex::Male,
        }
    }

    #[test]
    fn encode_matches_hand_computed_vector() {
        let pipeline = pipeline_from(artifact_json()).expect("valid artifact");
        let x = pipeline.encode(&record(Island::Biscoe));
        // [Biscoe, Dream, Torgersen, bill_len, bill_depth, flipper, mass, Female, Male]
        assert_eq!(x, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.5, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn predict_returns_argmax_class() {
        let pipeline = pipeline_from(artifact_json()).expect("valid artifact");
        assert_eq!(pipeline.predict(&record(Island::Torgersen)), Species::Adelie);
        assert_eq!(pipeline.predict(&record(Island::Dream)), Species::Chinstrap);
        assert_eq!(pipeline.predict(&record(Island::Biscoe)), Species::Gentoo);
    }

    #[test]
    fn ties_resolve_to_the_lowest_class_index() {
        let mut doc = artifact_json();
        doc["classifier"]["coefficients"] = serde_json::json!([
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        ]);
        let pipeline = pipeline_from(doc).expect("valid artifact");
        assert_eq!(pipeline.predict(&record(Island::Biscoe)), Species::Adelie);
    }

    #[test]
    fn unknown_class_label_is_rejected_at_load() {
        let mut doc = artifact_json();
        doc["classifier"]["classes"][2] = serde_json::json!("Unknown");
        let err = pipeline_from(doc).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownClassLabel(ref l) if l == "Unknown"));
        assert!(err.to_string().contains("Unknown"));
    }

    #[test]
    fn reordered_feature_schema_is_rejected() {
        let mut doc = artifact_json();
        doc["feature_names"] = serde_json::json!([
            "sex", "island", "bill_length_mm", "bill_depth_mm",
            "flipper_length_mm", "body_mass_g"
        ]);
        let err = pipeline_from(doc).unwrap_err();
        match err {
            PipelineError::SchemaMismatch { expected, found } => {
                assert!(expected.starts_with("island"));
                assert!(found.starts_with("sex"));
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn coefficient_width_mismatch_is_rejected() {
        let mut doc = artifact_json();
        doc["classifier"]["coefficients"][1] = serde_json::json!([0.0, 1.0]);
        let err = pipeline_from(doc).unwrap_err();
        assert!(matches!(err, PipelineError::BadShape(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn non_positive_std_is_rejected() {
        let mut doc = artifact_json();
        doc["preprocessing"]["numeric"][2]["std"] = serde_json::json!(0.0);
        let err = pipeline_from(doc).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::BadScaler { feature: "flipper_length_mm", .. }
        ));
    }

    #[test]
    fn incomplete_category_coverage_is_rejected() {
        let mut doc = artifact_json();
        doc["preprocessing"]["categorical"][0]["categories"] =
            serde_json::json!(["Biscoe", "Torgersen"]);
        let err = pipeline_from(doc).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingCategory { feature: "island", value: "Dream" }
        ));
    }

    #[test]
    fn numeric_encoder_for_categorical_feature_is_rejected() {
        let mut doc = artifact_json();
        doc["preprocessing"]["numeric"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({"feature": "island", "mean": 0.0, "std": 1.0}));
        let err = pipeline_from(doc).unwrap_err();
        assert!(matches!(err, PipelineError::WrongKind { feature: "island", .. }));
    }

    #[test]
    fn load_reads_and_validates_a_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("creating temp artifact");
        file.write_all(artifact_json().to_string().as_bytes())
            .expect("writing temp artifact");

        let pipeline = Pipeline::load(file.path()).expect("load should succeed");
        assert_eq!(pipeline.classes(), Species::ALL.as_slice());
    }
}
