//! Label Scan MCP Tools
//!
//! Tools for reconstructing, extracting and scoring nutrition labels.

use serde::Serialize;

use crate::label::{self, ScanError, ScanReport, ScoringTable};
use crate::llm::NutritionModel;
use crate::models::{NutritionRecord, TextFragment};

/// Response for reconstruct_label_text
#[derive(Debug, Serialize)]
pub struct ReconstructResponse {
    pub line_count: usize,
    pub lines: Vec<String>,
    pub text: String,
}

/// Response for analyze_model_reply and score_manual_entry
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub report: ScanReport,
    pub scoring_table: String,
    pub scored_at: String,
}

/// Response for scan_label
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub label_text: String,
    pub model_reply: String,
    #[serde(flatten)]
    pub report: ScanReport,
    pub scoring_table: String,
    pub scored_at: String,
}

/// Values typed in by hand, in canonical order
#[derive(Debug, Clone, Copy)]
pub struct ManualEntry {
    pub serving_size: f64,
    pub calories: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub sodium: f64,
    pub total_sugars: f64,
    pub fiber: f64,
    pub protein: f64,
}

impl ManualEntry {
    fn values(&self) -> [f64; 8] {
        [
            self.serving_size,
            self.calories,
            self.total_fat,
            self.saturated_fat,
            self.sodium,
            self.total_sugars,
            self.fiber,
            self.protein,
        ]
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn try_again<E: std::fmt::Display>(e: E) -> String {
    format!("{}. Please try again.", e)
}

pub fn reconstruct_label_text(fragments: &[TextFragment]) -> ReconstructResponse {
    let lines = label::reconstruct_lines(fragments);
    ReconstructResponse {
        line_count: lines.len(),
        lines: lines.iter().map(|l| l.text()).collect(),
        text: label::label_text(&lines),
    }
}

pub fn analyze_model_reply(table: &ScoringTable, reply: &str) -> Result<AnalysisResponse, String> {
    let report = label::analyze_reply(reply, table).map_err(try_again)?;

    Ok(AnalysisResponse {
        report,
        scoring_table: table.name().to_string(),
        scored_at: now(),
    })
}

pub fn score_manual_entry(table: &ScoringTable, entry: ManualEntry) -> Result<AnalysisResponse, String> {
    let record = NutritionRecord::from_values(entry.values()).map_err(|(field, value)| {
        if value.is_finite() {
            format!("{} cannot be negative", field.label())
        } else {
            format!("{} must be a number", field.label())
        }
    })?;

    Ok(AnalysisResponse {
        report: label::score_record(record, table),
        scoring_table: table.name().to_string(),
        scored_at: now(),
    })
}

pub async fn scan_label(
    model: &dyn NutritionModel,
    table: &ScoringTable,
    fragments: &[TextFragment],
) -> Result<ScanResponse, String> {
    let scan = label::scan_label(model, table, fragments)
        .await
        .map_err(|e| match e {
            ScanError::MalformedInput(e) => try_again(e),
            ScanError::Model(e) => format!("Label model error: {}", e),
        })?;

    Ok(ScanResponse {
        label_text: scan.label_text,
        model_reply: scan.reply,
        report: scan.report,
        scoring_table: table.name().to_string(),
        scored_at: now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn entry() -> ManualEntry {
        ManualEntry {
            serving_size: 30.0,
            calories: 120.0,
            total_fat: 5.0,
            saturated_fat: 1.0,
            sodium: 150.0,
            total_sugars: 8.0,
            fiber: 3.0,
            protein: 4.0,
        }
    }

    #[test]
    fn test_reconstruct_label_text() {
        let fragments = vec![
            TextFragment::at("120", 0.7, 0.8),
            TextFragment::at("Calories", 0.1, 0.8),
            TextFragment::at("Nutrition Facts", 0.1, 0.95),
        ];
        let response = reconstruct_label_text(&fragments);
        assert_eq!(response.line_count, 2);
        assert_eq!(response.lines, vec!["Nutrition Facts", "Calories 120"]);
        assert_eq!(response.text, "Nutrition Facts\nCalories 120");
    }

    #[test]
    fn test_analyze_model_reply() {
        let table = ScoringTable::standard();
        let response = analyze_model_reply(&table, "30\n120\n5\n1\n150\n8\n3\n4").unwrap();
        assert_eq!(response.report.result.total, 291);
        assert_eq!(response.scoring_table, "standard");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"]["grade"], "E");
        assert_eq!(json["values"][1], 120.0);
    }

    #[test]
    fn test_analyze_model_reply_asks_to_try_again() {
        let table = ScoringTable::standard();
        let err = analyze_model_reply(&table, "30\n120\nsorry, I can't read this").unwrap_err();
        assert_eq!(
            err,
            "Insufficient nutrition data: found 2 of 8 values. Please try again."
        );
    }

    #[test]
    fn test_score_manual_entry() {
        let table = ScoringTable::standard();
        let mut values = entry();
        values.fiber = 5.0;
        values.protein = 9.0;
        let response = score_manual_entry(&table, values).unwrap();
        // 4 unfavorable points, 10 favorable
        assert_eq!(response.report.result.score, -6);
        assert_eq!(response.report.result.grade, Grade::A);
    }

    #[test]
    fn test_score_manual_entry_rejects_negative() {
        let table = ScoringTable::standard();
        let mut values = entry();
        values.sodium = -10.0;
        assert_eq!(
            score_manual_entry(&table, values).unwrap_err(),
            "Sodium cannot be negative"
        );
    }

    #[test]
    fn test_score_manual_entry_rejects_infinity() {
        let table = ScoringTable::standard();
        let mut values = entry();
        values.calories = f64::INFINITY;
        assert_eq!(
            score_manual_entry(&table, values).unwrap_err(),
            "Calories must be a number"
        );
    }

    #[test]
    fn test_score_manual_entry_rejects_nan() {
        let table = ScoringTable::standard();
        let mut values = entry();
        values.protein = f64::NAN;
        assert_eq!(
            score_manual_entry(&table, values).unwrap_err(),
            "Protein must be a number"
        );
    }
}
