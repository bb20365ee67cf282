/// Data layer: typed records and dataset loading.
///
/// Architecture:
/// ```text
///  assets/penguins.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PenguinDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PenguinDataset  │  Vec<PenguinRow>, species queries
///   └────────────────┘
/// ```
///
/// The categorical domains (island, sex, species) are closed enums; the
/// loader rejects any token outside them instead of carrying raw strings
/// through the rest of the app.

pub mod loader;
pub mod model;
