//! Proportional chart segments for the result view

use serde::Serialize;

use crate::models::{NutrientField, NutritionRecord};

/// One slice of the nutrient breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub nutrient: NutrientField,
    pub label: &'static str,
    pub value: f64,
    /// Share of the seven-nutrient sum, 0 when the sum is 0
    pub fraction: f64,
}

/// Segments for every field except serving size, in canonical order
pub fn segments(record: &NutritionRecord) -> Vec<ChartSegment> {
    let sum = record.nutrient_sum();

    NutrientField::ALL
        .iter()
        .filter(|field| **field != NutrientField::ServingSize)
        .map(|&nutrient| {
            let value = record.get(nutrient);
            ChartSegment {
                nutrient,
                label: nutrient.label(),
                value,
                fraction: if sum > 0.0 { value / sum } else { 0.0 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_sum_to_one() {
        let record =
            NutritionRecord::from_values([30.0, 120.0, 5.0, 1.0, 150.0, 8.0, 3.0, 4.0]).unwrap();
        let segs = segments(&record);
        assert_eq!(segs.len(), 7);
        assert_eq!(segs[0].nutrient, NutrientField::Calories);
        let total: f64 = segs.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((segs[0].fraction - 120.0 / 291.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_record() {
        let record = NutritionRecord::from_values([30.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(segments(&record).iter().all(|s| s.fraction == 0.0));
    }
}
