//! OCR text fragments
//!
//! The input of the pipeline, one value per recognized text region.

use serde::{Deserialize, Serialize};

/// Normalized bounding box, all coordinates in [0, 1].
///
/// Higher `min_y` is visually higher on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// A single recognized span of text with its position on the label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub bounding_box: BoundingBox,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
        }
    }

    /// Shorthand for a fragment positioned only by its lower-left corner
    pub fn at(text: impl Into<String>, min_x: f64, min_y: f64) -> Self {
        Self::new(
            text,
            BoundingBox {
                min_x,
                min_y,
                width: 0.0,
                height: 0.0,
            },
        )
    }

    pub fn min_x(&self) -> f64 {
        self.bounding_box.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.bounding_box.min_y
    }
}
