//! Extraction contract shared with the label model
//!
//! The reply format here is what `label::extractor` parses. Bump
//! `CONTRACT_VERSION` whenever the prompt changes the shape of the reply.

pub const CONTRACT_VERSION: u32 = 1;

/// System prompt asking for the eight canonical values, one per line
pub const EXTRACTION_PROMPT: &str = "Please extract the following nutritional values from the provided text \
(only numerical value), listing each value (only numerical) on a new line (not a numbered list): \
serving size, calories, total fat (g), saturated fat (g), sodium (mg), total sugars (g), \
dietary fiber (g), and protein (g). If a value is absent, assume it is 0";
