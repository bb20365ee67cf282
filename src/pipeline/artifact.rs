use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// On-disk artifact format
// ---------------------------------------------------------------------------

/// The serialized pipeline document, exactly as produced by the external
/// training step. Deserialized from disk without integrity verification;
/// structural validation happens when building a
/// [`Pipeline`](super::Pipeline) from it.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineArtifact {
    /// Feature names the pipeline was fitted on, in input order.
    pub feature_names: Vec<String>,
    pub preprocessing: Preprocessing,
    pub classifier: LinearClassifier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Preprocessing {
    pub categorical: Vec<CategoricalEncoder>,
    pub numeric: Vec<NumericScaler>,
}

/// One-hot encoding for a categorical feature: one output column per
/// category, in the listed order.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalEncoder {
    pub feature: String,
    pub categories: Vec<String>,
}

/// Z-score scaling for a numeric feature.
#[derive(Debug, Clone, Deserialize)]
pub struct NumericScaler {
    pub feature: String,
    pub mean: f64,
    pub std: f64,
}

/// Multinomial linear classifier over the encoded feature vector:
/// one coefficient row and intercept per class, argmax decides.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Read an artifact document from disk.
pub fn read(path: &Path) -> Result<PipelineArtifact> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening pipeline artifact {}", path.display()))?;
    let artifact = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing pipeline artifact {}", path.display()))?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_artifact_document() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("creating temp artifact");
        file.write_all(
            br#"{
                "feature_names": ["island", "sex"],
                "preprocessing": {
                    "categorical": [{"feature": "island", "categories": ["Biscoe"]}],
                    "numeric": [{"feature": "bill_length_mm", "mean": 43.9, "std": 5.5}]
                },
                "classifier": {
                    "classes": ["Adelie"],
                    "coefficients": [[0.1, 0.2]],
                    "intercepts": [0.0]
                }
            }"#,
        )
        .expect("writing temp artifact");

        let artifact = read(file.path()).expect("read should succeed");
        assert_eq!(artifact.feature_names, vec!["island", "sex"]);
        assert_eq!(artifact.preprocessing.categorical[0].categories, vec!["Biscoe"]);
        assert_eq!(artifact.classifier.intercepts, vec![0.0]);
    }

    #[test]
    fn truncated_document_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("creating temp artifact");
        file.write_all(br#"{"feature_names": ["island"#)
            .expect("writing temp artifact");

        let err = read(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing pipeline artifact"));
    }
}
