//! Nutrition record extracted from a scanned label
//!
//! Holds the eight canonical fields in their fixed order.

use serde::{Deserialize, Serialize};

/// Number of values a complete record needs
pub const FIELD_COUNT: usize = 8;

/// The canonical nutrition fields, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientField {
    ServingSize,
    Calories,
    TotalFat,
    SaturatedFat,
    Sodium,
    TotalSugars,
    Fiber,
    Protein,
}

impl NutrientField {
    /// All fields in canonical order
    pub const ALL: [NutrientField; FIELD_COUNT] = [
        NutrientField::ServingSize,
        NutrientField::Calories,
        NutrientField::TotalFat,
        NutrientField::SaturatedFat,
        NutrientField::Sodium,
        NutrientField::TotalSugars,
        NutrientField::Fiber,
        NutrientField::Protein,
    ];

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        match self {
            NutrientField::ServingSize => 0,
            NutrientField::Calories => 1,
            NutrientField::TotalFat => 2,
            NutrientField::SaturatedFat => 3,
            NutrientField::Sodium => 4,
            NutrientField::TotalSugars => 5,
            NutrientField::Fiber => 6,
            NutrientField::Protein => 7,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            NutrientField::ServingSize => "Serving Size",
            NutrientField::Calories => "Calories",
            NutrientField::TotalFat => "Total Fat",
            NutrientField::SaturatedFat => "Saturated Fat",
            NutrientField::Sodium => "Sodium",
            NutrientField::TotalSugars => "Total Sugars",
            NutrientField::Fiber => "Dietary Fiber",
            NutrientField::Protein => "Protein",
        }
    }

    /// Unit the value is expressed in on a label
    pub fn unit(&self) -> &'static str {
        match self {
            NutrientField::ServingSize => "g",
            NutrientField::Calories => "kcal",
            NutrientField::Sodium => "mg",
            _ => "g",
        }
    }
}

/// Nutritional values for one scanned label.
///
/// Only built from a full set of eight non-negative values; fields are
/// read-only once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionRecord {
    serving_size: f64,
    calories: f64,
    total_fat: f64,
    saturated_fat: f64,
    sodium: f64,
    total_sugars: f64,
    fiber: f64,
    protein: f64,
}

impl NutritionRecord {
    /// Build a record from values in canonical order.
    ///
    /// Returns the first field holding a negative or non-finite value as the error.
    pub fn from_values(values: [f64; FIELD_COUNT]) -> Result<Self, (NutrientField, f64)> {
        for field in NutrientField::ALL {
            let value = values[field.index()];
            if !value.is_finite() || value < 0.0 {
                return Err((field, value));
            }
        }

        let [serving_size, calories, total_fat, saturated_fat, sodium, total_sugars, fiber, protein] =
            values;

        Ok(Self {
            serving_size,
            calories,
            total_fat,
            saturated_fat,
            sodium,
            total_sugars,
            fiber,
            protein,
        })
    }

    pub fn serving_size(&self) -> f64 {
        self.serving_size
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    pub fn total_fat(&self) -> f64 {
        self.total_fat
    }

    pub fn saturated_fat(&self) -> f64 {
        self.saturated_fat
    }

    pub fn sodium(&self) -> f64 {
        self.sodium
    }

    pub fn total_sugars(&self) -> f64 {
        self.total_sugars
    }

    pub fn fiber(&self) -> f64 {
        self.fiber
    }

    pub fn protein(&self) -> f64 {
        self.protein
    }

    /// Look up a field by name
    pub fn get(&self, field: NutrientField) -> f64 {
        match field {
            NutrientField::ServingSize => self.serving_size,
            NutrientField::Calories => self.calories,
            NutrientField::TotalFat => self.total_fat,
            NutrientField::SaturatedFat => self.saturated_fat,
            NutrientField::Sodium => self.sodium,
            NutrientField::TotalSugars => self.total_sugars,
            NutrientField::Fiber => self.fiber,
            NutrientField::Protein => self.protein,
        }
    }

    /// All values in canonical order
    pub fn values(&self) -> [f64; FIELD_COUNT] {
        NutrientField::ALL.map(|field| self.get(field))
    }

    /// Sum of every field except serving size
    pub fn nutrient_sum(&self) -> f64 {
        NutrientField::ALL
            .iter()
            .filter(|field| **field != NutrientField::ServingSize)
            .map(|field| self.get(*field))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_assigned_in_canonical_order() {
        let record =
            NutritionRecord::from_values([30.0, 120.0, 5.0, 1.0, 150.0, 8.0, 3.0, 4.0]).unwrap();
        assert_eq!(record.serving_size(), 30.0);
        assert_eq!(record.calories(), 120.0);
        assert_eq!(record.total_fat(), 5.0);
        assert_eq!(record.saturated_fat(), 1.0);
        assert_eq!(record.sodium(), 150.0);
        assert_eq!(record.total_sugars(), 8.0);
        assert_eq!(record.fiber(), 3.0);
        assert_eq!(record.protein(), 4.0);
        assert_eq!(record.values(), [30.0, 120.0, 5.0, 1.0, 150.0, 8.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rejects_negative_value() {
        let err = NutritionRecord::from_values([30.0, 120.0, 5.0, -1.0, 150.0, 8.0, 3.0, 4.0])
            .unwrap_err();
        assert_eq!(err, (NutrientField::SaturatedFat, -1.0));
    }

    #[test]
    fn test_rejects_non_finite_value() {
        let err = NutritionRecord::from_values([30.0, f64::INFINITY, 5.0, 1.0, 150.0, 8.0, 3.0, 4.0])
            .unwrap_err();
        assert_eq!(err.0, NutrientField::Calories);
    }

    #[test]
    fn test_nutrient_sum_excludes_serving_size() {
        let record =
            NutritionRecord::from_values([1000.0, 100.0, 5.0, 1.0, 200.0, 10.0, 2.0, 8.0]).unwrap();
        assert!((record.nutrient_sum() - 326.0).abs() < 1e-9);
    }

    #[test]
    fn test_field_index_matches_all() {
        for (i, field) in NutrientField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }
}
