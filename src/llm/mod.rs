//! Label model collaborator
//!
//! Turns reconstructed label text into the reply the extractor parses.

pub mod client;
pub mod prompt;

pub use client::{ModelError, NutritionModel, OpenAiModel, UnconfiguredModel};
pub use prompt::{CONTRACT_VERSION, EXTRACTION_PROMPT};
