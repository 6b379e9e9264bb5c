//! Label Scanner Library
//!
//! Turns OCR fragments of a nutrition label into a score and letter grade.

pub mod build_info;
pub mod config;
pub mod label;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod tools;
