//! Chart and dashboard visualization agent

use crate::agents::AdvisorAgent;
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::tools::chart::ChartRenderer;
use crate::tools::{CreateChartTool, ToolRegistry};
use std::sync::Arc;

pub const VISUALIZATION_PROMPT: &str = "\
You are a Visualization AI assistant. Your role is to create charts and dashboards to \
represent structured data clearly. You help MSPs and IT teams by converting financial, \
client, or operational data into visual insights.

When generating visualizations:
1. Use pie charts for categorical breakdowns (expenses, clients, resources)
2. Use line charts for trends over time
3. Save charts as images and return the path
4. Provide descriptive titles and labels";

/// Charts, dashboards, and visual insights
pub fn visualization_agent(
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
) -> AdvisorAgent {
    visualization_agent_with_renderer(model, client, ChartRenderer::default())
}

/// Variant with an explicit chart output directory
pub fn visualization_agent_with_renderer(
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
    renderer: ChartRenderer,
) -> AdvisorAgent {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(CreateChartTool::new(renderer)));

    AdvisorAgent::new(
        "visualization_agent",
        "creates charts, dashboards, and visual insights",
        VISUALIZATION_PROMPT,
        model,
        tools,
        client,
    )
}
