use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Canonical feature schema
// ---------------------------------------------------------------------------

/// The six model features, in the exact order the dataset file, the input
/// form, and the pipeline artifact must agree on.
pub const FEATURE_NAMES: [&str; 6] = [
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
];

/// Column holding the historical species label in the dataset file.
pub const LABEL_NAME: &str = "species";

/// A categorical token outside its closed value set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {field} value '{value}' (expected one of: {expected})")]
pub struct UnknownValueError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

// ---------------------------------------------------------------------------
// Closed categorical domains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Island {
    Torgersen,
    Dream,
    Biscoe,
}

impl Island {
    pub const ALL: [Island; 3] = [Island::Torgersen, Island::Dream, Island::Biscoe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Island::Torgersen => "Torgersen",
            Island::Dream => "Dream",
            Island::Biscoe => "Biscoe",
        }
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Island {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Torgersen" => Ok(Island::Torgersen),
            "Dream" => Ok(Island::Dream),
            "Biscoe" => Ok(Island::Biscoe),
            other => Err(UnknownValueError {
                field: "island",
                value: other.to_string(),
                expected: "Torgersen, Dream, Biscoe",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            other => Err(UnknownValueError {
                field: "sex",
                value: other.to_string(),
                expected: "Male, Female",
            }),
        }
    }
}

/// The closed set of species labels the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Chinstrap,
    Gentoo,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Chinstrap, Species::Gentoo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Chinstrap => "Chinstrap",
            Species::Gentoo => "Gentoo",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Adelie" => Ok(Species::Adelie),
            "Chinstrap" => Ok(Species::Chinstrap),
            "Gentoo" => Ok(Species::Gentoo),
            other => Err(UnknownValueError {
                field: "species",
                value: other.to_string(),
                expected: "Adelie, Chinstrap, Gentoo",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// PenguinRecord – the six features of one observation
// ---------------------------------------------------------------------------

/// One observation with every model feature populated.
///
/// This is what the input form assembles and what the pipeline predicts on;
/// historical rows carry one of these plus their species label.
#[derive(Debug, Clone, PartialEq)]
pub struct PenguinRecord {
    pub island: Island,
    pub bill_length_mm: f64,
    pub bill_depth_mm: f64,
    pub flipper_length_mm: f64,
    pub body_mass_g: f64,
    pub sex: Sex,
}

// ---------------------------------------------------------------------------
// PenguinDataset – the loaded historical dataset
// ---------------------------------------------------------------------------

/// A labeled historical row.
#[derive(Debug, Clone)]
pub struct PenguinRow {
    pub features: PenguinRecord,
    pub species: Species,
}

/// The full historical dataset, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct PenguinDataset {
    pub rows: Vec<PenguinRow>,
}

impl PenguinDataset {
    pub fn from_rows(rows: Vec<PenguinRow>) -> Self {
        PenguinDataset { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count per species, in `Species::ALL` order.
    pub fn species_counts(&self) -> Vec<(Species, usize)> {
        Species::ALL
            .iter()
            .map(|&sp| (sp, self.rows.iter().filter(|r| r.species == sp).count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(species: Species) -> PenguinRow {
        PenguinRow {
            features: PenguinRecord {
                island: Island::Biscoe,
                bill_length_mm: 45.0,
                bill_depth_mm: 15.0,
                flipper_length_mm: 210.0,
                body_mass_g: 5000.0,
                sex: Sex::Male,
            },
            species,
        }
    }

    #[test]
    fn species_counts_sum_to_dataset_len() {
        let ds = PenguinDataset::from_rows(vec![
            row(Species::Adelie),
            row(Species::Adelie),
            row(Species::Gentoo),
            row(Species::Chinstrap),
            row(Species::Gentoo),
        ]);
        let counts = ds.species_counts();
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), ds.len());
        assert_eq!(counts[0], (Species::Adelie, 2));
        assert_eq!(counts[1], (Species::Chinstrap, 1));
        assert_eq!(counts[2], (Species::Gentoo, 2));
    }

    #[test]
    fn species_counts_on_empty_dataset() {
        let ds = PenguinDataset::default();
        assert!(ds.is_empty());
        let counts = ds.species_counts();
        assert_eq!(counts.len(), Species::ALL.len());
        assert!(counts.iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn unknown_categorical_tokens_are_rejected() {
        let err = "Atlantis".parse::<Island>().unwrap_err();
        assert_eq!(err.field, "island");
        assert!(err.to_string().contains("Atlantis"));

        assert!("adelie".parse::<Species>().is_err(), "parsing is case-sensitive");
        assert_eq!("Gentoo".parse::<Species>(), Ok(Species::Gentoo));
    }
}
