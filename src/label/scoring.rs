//! Nutrition scoring
//!
//! Turns a record into points using an injected threshold table, then maps
//! the score onto a letter grade.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Grade, NutrientField, NutritionRecord, ScoreResult};

/// Scoring table validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringTableError {
    #[error("Serving size cannot be scored")]
    ServingSize,

    #[error("{} appears more than once", .0.label())]
    Duplicate(NutrientField),

    #[error("Thresholds for {} must be strictly ascending", .0.label())]
    Unordered(NutrientField),

    #[error("Invalid threshold for {}: {value}", .nutrient.label())]
    InvalidThreshold { nutrient: NutrientField, value: f64 },

    #[error("Invalid scoring table JSON: {0}")]
    Json(String),
}

/// Whether a nutrient raises or lowers the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// More of it is worse (calories, fat, sodium, sugars)
    Unfavorable,
    /// More of it is better (fiber, protein)
    Favorable,
}

/// Point bands for one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientBands {
    pub nutrient: NutrientField,
    pub direction: Direction,
    /// Ascending; one point per threshold the value strictly exceeds
    pub thresholds: Vec<f64>,
    pub max_points: u32,
}

impl NutrientBands {
    fn new(nutrient: NutrientField, direction: Direction, thresholds: &[f64]) -> Self {
        Self {
            nutrient,
            direction,
            thresholds: thresholds.to_vec(),
            max_points: thresholds.len() as u32,
        }
    }

    /// Points for a value, capped at `max_points`
    pub fn points(&self, value: f64) -> u32 {
        let exceeded = self.thresholds.iter().filter(|t| value > **t).count() as u32;
        exceeded.min(self.max_points)
    }

    fn validate(&self) -> Result<(), ScoringTableError> {
        if self.nutrient == NutrientField::ServingSize {
            return Err(ScoringTableError::ServingSize);
        }
        for &value in &self.thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringTableError::InvalidThreshold {
                    nutrient: self.nutrient,
                    value,
                });
            }
        }
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ScoringTableError::Unordered(self.nutrient));
        }
        Ok(())
    }
}

/// Points one nutrient contributed to a score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientPoints {
    pub nutrient: NutrientField,
    pub direction: Direction,
    pub value: f64,
    pub points: u32,
}

/// On-disk shape of a scoring table
#[derive(Debug, Deserialize)]
struct ScoringTableFile {
    name: String,
    bands: Vec<NutrientBands>,
}

/// Named, validated set of nutrient bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringTableFile")]
pub struct ScoringTable {
    name: String,
    bands: Vec<NutrientBands>,
}

impl TryFrom<ScoringTableFile> for ScoringTable {
    type Error = ScoringTableError;

    fn try_from(file: ScoringTableFile) -> Result<Self, Self::Error> {
        ScoringTable::new(file.name, file.bands)
    }
}

impl ScoringTable {
    pub fn new(name: impl Into<String>, bands: Vec<NutrientBands>) -> Result<Self, ScoringTableError> {
        let mut seen = HashSet::new();
        for band in &bands {
            band.validate()?;
            if !seen.insert(band.nutrient) {
                return Err(ScoringTableError::Duplicate(band.nutrient));
            }
        }
        Ok(Self {
            name: name.into(),
            bands,
        })
    }

    /// Parse and validate a table from JSON
    pub fn from_json(json: &str) -> Result<Self, ScoringTableError> {
        serde_json::from_str(json).map_err(|e| ScoringTableError::Json(e.to_string()))
    }

    /// Nutri-Score style bands applied to label values
    pub fn standard() -> Self {
        use Direction::{Favorable, Unfavorable};
        use NutrientField::*;

        Self {
            name: "standard".to_string(),
            bands: vec![
                NutrientBands::new(
                    Calories,
                    Unfavorable,
                    &[80.0, 160.0, 240.0, 320.0, 400.0, 480.0, 560.0, 640.0, 720.0, 800.0],
                ),
                NutrientBands::new(
                    TotalFat,
                    Unfavorable,
                    &[3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0, 24.0, 27.0, 30.0],
                ),
                NutrientBands::new(
                    SaturatedFat,
                    Unfavorable,
                    &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
                ),
                NutrientBands::new(
                    Sodium,
                    Unfavorable,
                    &[90.0, 180.0, 270.0, 360.0, 450.0, 540.0, 630.0, 720.0, 810.0, 900.0],
                ),
                NutrientBands::new(
                    TotalSugars,
                    Unfavorable,
                    &[4.5, 9.0, 13.5, 18.0, 22.5, 27.0, 31.0, 36.0, 40.0, 45.0],
                ),
                NutrientBands::new(Fiber, Favorable, &[0.9, 1.9, 2.8, 3.7, 4.7]),
                NutrientBands::new(Protein, Favorable, &[1.6, 3.2, 4.8, 6.4, 8.0]),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bands(&self) -> &[NutrientBands] {
        &self.bands
    }

    /// Points per scored nutrient, in table order
    pub fn breakdown(&self, record: &NutritionRecord) -> Vec<NutrientPoints> {
        self.bands
            .iter()
            .map(|band| {
                let value = record.get(band.nutrient);
                NutrientPoints {
                    nutrient: band.nutrient,
                    direction: band.direction,
                    value,
                    points: band.points(value),
                }
            })
            .collect()
    }

    /// Unfavorable points minus favorable points
    pub fn score(&self, record: &NutritionRecord) -> i32 {
        self.breakdown(record)
            .iter()
            .map(|p| match p.direction {
                Direction::Unfavorable => p.points as i32,
                Direction::Favorable => -(p.points as i32),
            })
            .sum()
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Truncated sum of the seven non-serving-size fields, for display
pub fn total(record: &NutritionRecord) -> i64 {
    record.nutrient_sum().trunc() as i64
}

/// Score, grade and total for a record
pub fn evaluate(table: &ScoringTable, record: &NutritionRecord) -> ScoreResult {
    let score = table.score(record);
    ScoreResult {
        score,
        grade: Grade::from_score(score),
        total: total(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: [f64; 8]) -> NutritionRecord {
        NutritionRecord::from_values(values).unwrap()
    }

    #[test]
    fn test_total_truncates() {
        let r = record([1000.0, 100.0, 5.0, 1.0, 200.0, 10.0, 2.0, 8.0]);
        assert_eq!(total(&r), 326);

        let r = record([0.0, 100.4, 0.3, 0.2, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(total(&r), 100);
    }

    #[test]
    fn test_points_strictly_exceed() {
        let band = NutrientBands::new(NutrientField::Sodium, Direction::Unfavorable, &[90.0, 180.0]);
        assert_eq!(band.points(90.0), 0);
        assert_eq!(band.points(90.5), 1);
        assert_eq!(band.points(180.0), 1);
        assert_eq!(band.points(1000.0), 2);
    }

    #[test]
    fn test_points_capped() {
        let band = NutrientBands {
            nutrient: NutrientField::Calories,
            direction: Direction::Unfavorable,
            thresholds: vec![10.0, 20.0, 30.0],
            max_points: 2,
        };
        assert_eq!(band.points(100.0), 2);
    }

    #[test]
    fn test_standard_table_scan_example() {
        let table = ScoringTable::standard();
        let r = record([30.0, 120.0, 5.0, 1.0, 150.0, 8.0, 3.0, 4.0]);

        let breakdown = table.breakdown(&r);
        let points: Vec<u32> = breakdown.iter().map(|p| p.points).collect();
        // calories, fat, sat fat, sodium, sugars, fiber, protein
        assert_eq!(points, vec![1, 1, 0, 1, 1, 3, 2]);

        let result = evaluate(&table, &r);
        assert_eq!(result.score, -1);
        // -1 is one of the unbanded scores
        assert_eq!(result.grade, Grade::E);
        assert_eq!(result.total, 291);
    }

    #[test]
    fn test_standard_table_extremes() {
        let table = ScoringTable::standard();

        let junk = record([100.0, 900.0, 40.0, 15.0, 1200.0, 60.0, 0.0, 0.0]);
        let result = evaluate(&table, &junk);
        assert_eq!(result.score, 50);
        assert_eq!(result.grade, Grade::E);

        let greens = record([100.0, 20.0, 0.2, 0.0, 10.0, 1.0, 6.0, 9.0]);
        let result = evaluate(&table, &greens);
        assert_eq!(result.score, -10);
        assert_eq!(result.grade, Grade::A);
    }

    #[test]
    fn test_table_rejects_serving_size() {
        let bands = vec![NutrientBands::new(NutrientField::ServingSize, Direction::Unfavorable, &[1.0])];
        assert_eq!(ScoringTable::new("bad", bands), Err(ScoringTableError::ServingSize));
    }

    #[test]
    fn test_table_rejects_duplicates() {
        let bands = vec![
            NutrientBands::new(NutrientField::Sodium, Direction::Unfavorable, &[90.0]),
            NutrientBands::new(NutrientField::Sodium, Direction::Unfavorable, &[180.0]),
        ];
        assert_eq!(
            ScoringTable::new("bad", bands),
            Err(ScoringTableError::Duplicate(NutrientField::Sodium))
        );
    }

    #[test]
    fn test_table_rejects_unordered_thresholds() {
        let bands = vec![NutrientBands::new(NutrientField::Fiber, Direction::Favorable, &[2.0, 1.0])];
        assert_eq!(
            ScoringTable::new("bad", bands),
            Err(ScoringTableError::Unordered(NutrientField::Fiber))
        );
    }

    #[test]
    fn test_table_rejects_negative_threshold() {
        let bands = vec![NutrientBands::new(NutrientField::Fiber, Direction::Favorable, &[-1.0])];
        assert!(matches!(
            ScoringTable::new("bad", bands),
            Err(ScoringTableError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{
            "name": "sodium only",
            "bands": [
                {"nutrient": "sodium", "direction": "unfavorable", "thresholds": [100, 200], "max_points": 2},
                {"nutrient": "protein", "direction": "favorable", "thresholds": [5], "max_points": 1}
            ]
        }"#;
        let table = ScoringTable::from_json(json).unwrap();
        assert_eq!(table.name(), "sodium only");
        assert_eq!(table.bands().len(), 2);

        let r = record([30.0, 500.0, 50.0, 20.0, 250.0, 50.0, 0.0, 6.0]);
        assert_eq!(table.score(&r), 1);
    }

    #[test]
    fn test_table_from_json_validates() {
        let json = r#"{"name": "x", "bands": [
            {"nutrient": "serving_size", "direction": "favorable", "thresholds": [1], "max_points": 1}
        ]}"#;
        let err = ScoringTable::from_json(json).unwrap_err();
        assert!(matches!(err, ScoringTableError::Json(msg) if msg.contains("Serving size")));
    }

    #[test]
    fn test_standard_table_is_valid() {
        let standard = ScoringTable::standard();
        let rebuilt = ScoringTable::new(standard.name(), standard.bands().to_vec()).unwrap();
        assert_eq!(rebuilt, standard);
    }
}
