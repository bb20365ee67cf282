use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{PenguinDataset, PenguinRecord, PenguinRow, FEATURE_NAMES, LABEL_NAME};

// ---------------------------------------------------------------------------
// CSV dataset loader
// ---------------------------------------------------------------------------

/// One dataset row as it appears on disk, before typed conversion.
#[derive(Debug, Deserialize)]
struct RawRow {
    island: String,
    bill_length_mm: f64,
    bill_depth_mm: f64,
    flipper_length_mm: f64,
    body_mass_g: f64,
    sex: String,
    species: String,
}

impl RawRow {
    fn into_row(self) -> Result<PenguinRow> {
        Ok(PenguinRow {
            features: PenguinRecord {
                island: self.island.parse()?,
                bill_length_mm: self.bill_length_mm,
                bill_depth_mm: self.bill_depth_mm,
                flipper_length_mm: self.flipper_length_mm,
                body_mass_g: self.body_mass_g,
                sex: self.sex.parse()?,
            },
            species: self.species.parse()?,
        })
    }
}

/// Load the historical dataset from a CSV file.
///
/// The header must contain every feature column plus the species label;
/// any missing column, unparseable number, or unknown categorical token is
/// a fatal error carrying the offending row in its context chain.
pub fn load_dataset(path: &Path) -> Result<PenguinDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening dataset {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading dataset headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let missing: Vec<&str> = FEATURE_NAMES
        .iter()
        .chain(std::iter::once(&LABEL_NAME))
        .filter(|col| !headers.iter().any(|h| h == *col))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!(
            "dataset {} is missing columns: {}",
            path.display(),
            missing.join(", ")
        );
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("dataset row {row_no}"))?;
        let row = raw
            .into_row()
            .with_context(|| format!("dataset row {row_no}"))?;
        rows.push(row);
    }

    Ok(PenguinDataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{Island, Sex, Species};

    const HEADER: &str =
        "island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,species";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("creating temp csv");
        file.write_all(contents.as_bytes()).expect("writing temp csv");
        file
    }

    #[test]
    fn loads_well_formed_csv() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Torgersen,39.1,18.7,181,3750,Male,Adelie\n\
             Biscoe,46.5,14.8,217,5200,Female,Gentoo\n\
             Dream,49.2,18.2,195,3800,Male,Chinstrap\n"
        ));

        let ds = load_dataset(file.path()).expect("load should succeed");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[0].species, Species::Adelie);
        assert_eq!(ds.rows[0].features.island, Island::Torgersen);
        assert_eq!(ds.rows[1].features.sex, Sex::Female);
        assert_eq!(ds.rows[2].features.flipper_length_mm, 195.0);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_csv(
            "island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex\n\
             Torgersen,39.1,18.7,181,3750,Male\n",
        );

        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("species"), "got: {err:#}");
    }

    #[test]
    fn malformed_number_reports_row() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Torgersen,39.1,18.7,181,3750,Male,Adelie\n\
             Biscoe,not-a-number,14.8,217,5200,Female,Gentoo\n"
        ));

        let err = load_dataset(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"), "got: {err:#}");
    }

    #[test]
    fn unknown_species_label_is_fatal() {
        let file = write_csv(&format!(
            "{HEADER}\n\
             Torgersen,39.1,18.7,181,3750,Male,Emperor\n"
        ));

        let err = load_dataset(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Emperor"), "got: {err:#}");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_dataset(Path::new("no/such/penguins.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("penguins.csv"));
    }
}
