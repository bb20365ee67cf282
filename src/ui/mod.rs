/// UI layer: one module per view plus shared decorative effects.

pub mod effects;
pub mod panels;
pub mod plot;
pub mod predict;
pub mod table;
