//! Build and contract identity
//!
//! The build number and timestamp come from `build.rs`; the extraction
//! contract version travels with them so a scored result can be traced back
//! to the binary and prompt that produced it.

use serde::Serialize;

use crate::llm::CONTRACT_VERSION;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("LABEL_SCANNER_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("LABEL_SCANNER_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Identity of the running scanner, reported by `scanner_status`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub contract_version: u32,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            contract_version: CONTRACT_VERSION,
        }
    }
}

/// Banner lines for the configured scanner; `model` is `None` when no API
/// key is set
pub fn startup_banner(info: &BuildInfo, scoring_table: &str, model: Option<&str>) -> Vec<String> {
    vec![
        "===============================================".to_string(),
        "  Label Scanner".to_string(),
        format!("  Version: {} | Build: {}", info.version, info.build_number),
        format!("  Compiled: {}", info.build_timestamp),
        format!(
            "  Contract: v{} | Table: {}",
            info.contract_version, scoring_table
        ),
        format!("  Model: {}", model.unwrap_or("not configured")),
        "===============================================".to_string(),
    ]
}

/// Print the startup banner to stderr
pub fn print_startup_banner(scoring_table: &str, model: Option<&str>) {
    for line in startup_banner(&BuildInfo::current(), scoring_table, model) {
        eprintln!("{}", line);
    }
}
