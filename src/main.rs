//! Label Scanner
//!
//! An MCP server that scores nutrition labels from OCR output.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use label_scanner::build_info;
use label_scanner::config::Config;
use label_scanner::llm::{NutritionModel, OpenAiModel, UnconfiguredModel};
use label_scanner::mcp::LabelScannerService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("label_scanner=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let scoring_table = config.scoring_table()?;

    let (model, model_configured): (Arc<dyn NutritionModel>, bool) = match OpenAiModel::from_config(&config) {
        Some(model) => (Arc::new(model), true),
        None => {
            tracing::warn!("No API key configured; scan_label is disabled");
            (Arc::new(UnconfiguredModel), false)
        }
    };

    build_info::print_startup_banner(
        scoring_table.name(),
        model_configured.then_some(config.model.as_str()),
    );
    eprintln!("Starting MCP server on stdio...");

    let service = LabelScannerService::new(model, model_configured, scoring_table);

    // Create stdio transport
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
