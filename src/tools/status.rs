//! Label Scanner Status Tool
//!
//! Provides runtime status information and usage instructions.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Scanning instructions for AI assistants
pub const SCAN_INSTRUCTIONS: &str = r#"
# Label Scanner Instructions

This guide explains how to turn a photographed nutrition label into a
health score using the Label Scanner tools.

## Pipeline

1. **OCR fragments** - Each recognized text region with its bounding box
   (`text`, `min_x`, `min_y`, `width`, `height`, normalized to 0..1,
   higher `min_y` is higher on the page)
2. **Label text** - Fragments grouped into lines, top to bottom
3. **Model reply** - Eight numbers, one per line
4. **Score** - Score, grade (A best, E worst) and total

---

## Which tool to call

| You have | Call |
|----------|------|
| OCR fragments, want everything | `scan_label` |
| OCR fragments, want only the text | `reconstruct_label_text` |
| A model reply (eight numbers) | `analyze_model_reply` |
| Values typed in by the user | `score_manual_entry` |

---

## Reply format

The reply must contain the eight values **one per line, numbers only**, in
this order:

1. serving size
2. calories
3. total fat (g)
4. saturated fat (g)
5. sodium (mg)
6. total sugars (g)
7. dietary fiber (g)
8. protein (g)

Use 0 for anything missing from the label.

Lines with units or words ("12g", "Calories: 120") are **ignored**, not
parsed. If fewer than eight bare numbers remain the scan is rejected and the
user should try again. Never show a partial or zero-filled score.

---

## Grades

| Score | Grade |
|-------|-------|
| below -1 | A |
| 0 to 1 | B |
| 3 to 9 | C |
| 11 to 18 | D |
| 19 and above | E |

Scores of exactly -1, 2 and 10 currently grade as E.

The total is the sum of every value except serving size, truncated. It is for
display only and does not affect the grade.
"#;

/// Runtime status of the scanner service
#[derive(Debug, Clone, Serialize)]
pub struct ScannerStatus {
    /// Build and contract information
    #[serde(flatten)]
    pub build: BuildInfo,

    /// Model information
    pub model: String,
    pub model_configured: bool,
    pub scoring_table: String,

    /// Scan counters since startup
    pub scans_completed: u64,
    pub scans_rejected: u64,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    model: String,
    model_configured: bool,
    scoring_table: String,
    scans_completed: u64,
    scans_rejected: u64,
}

impl StatusTracker {
    pub fn new(model: impl Into<String>, model_configured: bool, scoring_table: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            model: model.into(),
            model_configured,
            scoring_table: scoring_table.into(),
            scans_completed: 0,
            scans_rejected: 0,
        }
    }

    /// Count a finished scan attempt
    pub fn record_scan(&mut self, succeeded: bool) {
        if succeeded {
            self.scans_completed += 1;
        } else {
            self.scans_rejected += 1;
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ScannerStatus {
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ScannerStatus {
            build: BuildInfo::current(),
            model: self.model.clone(),
            model_configured: self.model_configured,
            scoring_table: self.scoring_table.clone(),
            scans_completed: self.scans_completed,
            scans_rejected: self.scans_rejected,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_counters() {
        let mut tracker = StatusTracker::new("gpt-3.5-turbo", true, "standard");
        tracker.record_scan(true);
        tracker.record_scan(true);
        tracker.record_scan(false);

        let status = tracker.get_status();
        assert_eq!(status.scans_completed, 2);
        assert_eq!(status.scans_rejected, 1);
        assert_eq!(status.model, "gpt-3.5-turbo");
        assert!(status.model_configured);
        assert_eq!(status.scoring_table, "standard");
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.build, BuildInfo::current());

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["contract_version"], crate::llm::CONTRACT_VERSION);
        assert_eq!(json["scoring_table"], "standard");
    }
}
