//! Label pipeline
//!
//! fragments -> lines -> model reply -> record -> score. Extraction must
//! succeed before anything is scored.

use serde::Serialize;
use thiserror::Error;

use super::chart::{segments, ChartSegment};
use super::extractor::{extract_record, ExtractError};
use super::lines::{label_text, reconstruct_lines};
use super::scoring::{evaluate, NutrientPoints, ScoringTable};
use crate::llm::{ModelError, NutritionModel};
use crate::models::{NutritionRecord, ScoreResult, TextFragment, FIELD_COUNT};

/// Pipeline error types
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    MalformedInput(#[from] ExtractError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Everything the result view needs for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Canonical values in extraction order
    pub values: [f64; FIELD_COUNT],
    pub record: NutritionRecord,
    pub result: ScoreResult,
    pub breakdown: Vec<NutrientPoints>,
    pub chart: Vec<ChartSegment>,
}

/// A full scan, including what was sent to and received from the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScan {
    pub label_text: String,
    pub reply: String,
    pub report: ScanReport,
}

/// Score an already-built record
pub fn score_record(record: NutritionRecord, table: &ScoringTable) -> ScanReport {
    ScanReport {
        values: record.values(),
        record,
        result: evaluate(table, &record),
        breakdown: table.breakdown(&record),
        chart: segments(&record),
    }
}

/// Extract and score a model reply
pub fn analyze_reply(reply: &str, table: &ScoringTable) -> Result<ScanReport, ExtractError> {
    let record = extract_record(reply)?;
    Ok(score_record(record, table))
}

/// Run the whole pipeline for one set of OCR fragments.
///
/// An empty label never reaches the model; it is reported as
/// insufficient data straight away.
pub async fn scan_label(
    model: &dyn NutritionModel,
    table: &ScoringTable,
    fragments: &[TextFragment],
) -> Result<LabelScan, ScanError> {
    let lines = reconstruct_lines(fragments);
    if lines.is_empty() {
        tracing::warn!("No text fragments to scan");
        return Err(ExtractError::InsufficientData { found: 0 }.into());
    }
    let text = label_text(&lines);

    let reply = model.extract_values(&text).await.map_err(|e| {
        tracing::warn!(model = model.name(), "Model call failed: {}", e);
        e
    })?;

    let report = analyze_reply(&reply, table)?;
    tracing::info!(
        score = report.result.score,
        grade = %report.result.grade,
        total = report.result.total,
        "Label scanned"
    );

    Ok(LabelScan {
        label_text: text,
        reply,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    #[test]
    fn test_analyze_reply() {
        let report = analyze_reply("30\n120\n5\n1\n150\n8\n3\n4", &ScoringTable::standard()).unwrap();
        assert_eq!(report.values, [30.0, 120.0, 5.0, 1.0, 150.0, 8.0, 3.0, 4.0]);
        assert_eq!(report.result.score, -1);
        assert_eq!(report.result.grade, Grade::E);
        assert_eq!(report.result.total, 291);
        assert_eq!(report.breakdown.len(), 7);
        assert_eq!(report.chart.len(), 7);
    }

    #[test]
    fn test_analyze_reply_short_circuits() {
        let err = analyze_reply("30\n120\n5", &ScoringTable::standard()).unwrap_err();
        assert_eq!(err, ExtractError::InsufficientData { found: 3 });
    }

    #[test]
    fn test_scan_error_message_passes_through() {
        let err: ScanError = ExtractError::InsufficientData { found: 2 }.into();
        assert_eq!(err.to_string(), "Insufficient nutrition data: found 2 of 8 values");
    }
}
