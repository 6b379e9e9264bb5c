//! Label Scanner MCP Server Implementation
//!
//! Implements the MCP server with all Label Scanner tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::label::ScoringTable;
use crate::llm::NutritionModel;
use crate::models::{BoundingBox, TextFragment};
use crate::tools::scan::{self, ManualEntry};
use crate::tools::status::StatusTracker;

/// Label Scanner MCP Service
#[derive(Clone)]
pub struct LabelScannerService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    model: Arc<dyn NutritionModel>,
    scoring_table: Arc<ScoringTable>,
    tool_router: ToolRouter<LabelScannerService>,
}

impl LabelScannerService {
    pub fn new(model: Arc<dyn NutritionModel>, model_configured: bool, scoring_table: ScoringTable) -> Self {
        let tracker = StatusTracker::new(model.name(), model_configured, scoring_table.name());
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            model,
            scoring_table: Arc::new(scoring_table),
            tool_router: Self::tool_router(),
        }
    }

    async fn record_scan(&self, succeeded: bool) {
        self.status_tracker.lock().await.record_scan(succeeded);
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// One OCR text region
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FragmentParam {
    /// Recognized text
    pub text: String,
    /// Left edge, normalized 0..1
    pub min_x: f64,
    /// Bottom edge, normalized 0..1 (higher is higher on the page)
    pub min_y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl From<FragmentParam> for TextFragment {
    fn from(p: FragmentParam) -> Self {
        TextFragment::new(
            p.text,
            BoundingBox {
                min_x: p.min_x,
                min_y: p.min_y,
                width: p.width,
                height: p.height,
            },
        )
    }
}

fn into_fragments(params: Vec<FragmentParam>) -> Vec<TextFragment> {
    params.into_iter().map(TextFragment::from).collect()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FragmentsParams {
    /// OCR fragments in any order
    pub fragments: Vec<FragmentParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeModelReplyParams {
    /// Model reply: eight numbers, one per line, in canonical order
    pub reply: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScoreManualEntryParams {
    /// Serving size in grams
    pub serving_size: f64,
    /// Calories (kcal)
    pub calories: f64,
    /// Total fat (g)
    #[serde(default)]
    pub total_fat: f64,
    /// Saturated fat (g)
    #[serde(default)]
    pub saturated_fat: f64,
    /// Sodium (mg)
    #[serde(default)]
    pub sodium: f64,
    /// Total sugars (g)
    #[serde(default)]
    pub total_sugars: f64,
    /// Dietary fiber (g)
    #[serde(default)]
    pub fiber: f64,
    /// Protein (g)
    #[serde(default)]
    pub protein: f64,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl LabelScannerService {
    // --- Status ---

    #[tool(description = "Get the current status of the Label Scanner service including build info, model configuration, scan counters and process information")]
    async fn scanner_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for scanning nutrition labels. Call this before scanning or when unsure which tool to use.")]
    fn scan_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SCAN_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SCAN_INSTRUCTIONS)]))
    }

    #[tool(description = "Get the scoring table: point thresholds and caps for each nutrient")]
    fn get_scoring_table(&self) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(self.scoring_table.as_ref())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Scanning ---

    #[tool(description = "Group OCR text fragments into label lines, top to bottom and left to right")]
    fn reconstruct_label_text(&self, Parameters(p): Parameters<FragmentsParams>) -> Result<CallToolResult, McpError> {
        let result = scan::reconstruct_label_text(&into_fragments(p.fragments));
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Score a model reply containing eight numbers (serving size, calories, total fat, saturated fat, sodium, total sugars, fiber, protein), one per line")]
    async fn analyze_model_reply(&self, Parameters(p): Parameters<AnalyzeModelReplyParams>) -> Result<CallToolResult, McpError> {
        let result = scan::analyze_model_reply(&self.scoring_table, &p.reply);
        self.record_scan(result.is_ok()).await;
        let result = result.map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Score nutrition values entered by hand. Missing nutrients default to 0.")]
    fn score_manual_entry(&self, Parameters(p): Parameters<ScoreManualEntryParams>) -> Result<CallToolResult, McpError> {
        let entry = ManualEntry {
            serving_size: p.serving_size, calories: p.calories, total_fat: p.total_fat,
            saturated_fat: p.saturated_fat, sodium: p.sodium, total_sugars: p.total_sugars,
            fiber: p.fiber, protein: p.protein,
        };
        let result = scan::score_manual_entry(&self.scoring_table, entry)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Scan a nutrition label from OCR fragments: rebuild the label text, ask the model for the eight values, then score and grade them. Requires a configured model API key.")]
    async fn scan_label(&self, Parameters(p): Parameters<FragmentsParams>) -> Result<CallToolResult, McpError> {
        let fragments = into_fragments(p.fragments);
        let result = scan::scan_label(self.model.as_ref(), &self.scoring_table, &fragments).await;
        self.record_scan(result.is_ok()).await;
        let result = result.map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LabelScannerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "label-scanner".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Label Scanner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Label Scanner - Nutrition label scoring from OCR output. \
                 IMPORTANT: Call scan_instructions before scanning. \
                 Scanning: scan_label (full pipeline), reconstruct_label_text, analyze_model_reply. \
                 Manual entry: score_manual_entry. \
                 Reference: get_scoring_table, scanner_status."
                    .into(),
            ),
        }
    }
}
