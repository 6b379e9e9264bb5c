//! Data models
//!
//! Value types flowing through the label pipeline.

mod fragment;
mod nutrition;
mod score;

pub use fragment::{BoundingBox, TextFragment};
pub use nutrition::{NutrientField, NutritionRecord, FIELD_COUNT};
pub use score::{Grade, ScoreResult};
