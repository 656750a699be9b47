//! Sales and marketing recommendation agent

use crate::agents::AdvisorAgent;
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::tools::ToolRegistry;
use std::sync::Arc;

pub const SALES_MARKETING_PROMPT: &str = "\
You are an AI agent helping MSPs optimize sales and marketing.
Provide actionable recommendations, upsell/cross-sell strategies, and campaign suggestions.
Always prioritize actions that drive growth and revenue.
Use structured output when requested to provide comprehensive reports.";

/// Upsell, cross-sell, and campaign recommendations
pub fn sales_marketing_agent(
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
) -> AdvisorAgent {
    AdvisorAgent::new(
        "sales_marketing_agent",
        "provides upsell, cross-sell, and campaign recommendations",
        SALES_MARKETING_PROMPT,
        model,
        ToolRegistry::new(),
        client,
    )
}
