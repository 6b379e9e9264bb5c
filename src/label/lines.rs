//! Line reconstruction
//!
//! Groups positioned OCR fragments into visual rows of label text.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::TextFragment;

/// Maximum vertical step, in normalized units, between neighbouring
/// fragments of the same line
pub const LINE_THRESHOLD: f64 = 0.02;

/// One visual row of the label, fragments left to right
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconstructedLine {
    pub fragments: Vec<TextFragment>,
}

impl ReconstructedLine {
    /// Fragment texts joined by single spaces
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// IEEE comparison, so `-0.0 == 0.0`; NaN falls back to `total_cmp`
fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Reading order: top of the page first, then left to right
fn reading_order(a: &TextFragment, b: &TextFragment) -> Ordering {
    compare(b.min_y(), a.min_y()).then_with(|| compare(a.min_x(), b.min_x()))
}

/// Group fragments into lines, top to bottom.
///
/// Each fragment is compared against the last fragment placed in the open
/// line, not the first, so a line may drift across several sub-threshold
/// steps.
pub fn reconstruct_lines(fragments: &[TextFragment]) -> Vec<ReconstructedLine> {
    let mut sorted = fragments.to_vec();
    sorted.sort_by(reading_order);

    let mut lines = Vec::new();
    let mut current: Vec<TextFragment> = Vec::new();

    for fragment in sorted {
        if let Some(last) = current.last() {
            if (fragment.min_y() - last.min_y()).abs() > LINE_THRESHOLD {
                lines.push(ReconstructedLine {
                    fragments: std::mem::take(&mut current),
                });
            }
        }
        current.push(fragment);
    }

    if !current.is_empty() {
        lines.push(ReconstructedLine { fragments: current });
    }

    tracing::debug!(
        fragments = fragments.len(),
        lines = lines.len(),
        "Reconstructed label lines"
    );
    lines
}

/// Newline-joined text of all lines, the payload sent to the model
pub fn label_text(lines: &[ReconstructedLine]) -> String {
    lines
        .iter()
        .map(ReconstructedLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}
