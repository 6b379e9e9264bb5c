//! Label pipeline module
//!
//! Line reconstruction, nutrient extraction and scoring.

pub mod chart;
pub mod extractor;
pub mod lines;
pub mod pipeline;
pub mod scoring;

pub use chart::{segments, ChartSegment};
pub use extractor::{extract_record, extract_values, record_from_values, ExtractError};
pub use lines::{label_text, reconstruct_lines, ReconstructedLine, LINE_THRESHOLD};
pub use pipeline::{analyze_reply, scan_label, score_record, LabelScan, ScanError, ScanReport};
pub use scoring::{
    evaluate, total, Direction, NutrientBands, NutrientPoints, ScoringTable, ScoringTableError,
};
