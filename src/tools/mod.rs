//! Label Scanner Tools module
//!
//! MCP tool implementations for the Label Scanner.

pub mod scan;
pub mod status;
