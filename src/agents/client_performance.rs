//! Client profitability and engagement agent

use crate::agents::AdvisorAgent;
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::tools::ToolRegistry;
use std::sync::Arc;

pub const CLIENT_PERFORMANCE_PROMPT: &str = "\
You are a client performance analyst for MSPs. You track client profitability, service \
costs, and engagement, and identify which clients drive margin and which erode it.

When analyzing client performance:
1. Report per-client revenue, cost to serve, and profit margin.
2. Highlight the most and least profitable clients.
3. Flag clients with declining engagement or rising service costs.
4. Provide structured output in ClientPerformanceReport format.";

/// Client profitability and engagement tracking
pub fn client_performance_agent(
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
) -> AdvisorAgent {
    AdvisorAgent::new(
        "client_performance_agent",
        "tracks client profitability and engagement",
        CLIENT_PERFORMANCE_PROMPT,
        model,
        ToolRegistry::new(),
        client,
    )
}
