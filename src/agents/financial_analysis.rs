//! Investment and portfolio analysis agent

use crate::agents::AdvisorAgent;
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::tools::{AnalyzePortfolioTool, ToolRegistry};
use std::sync::Arc;

pub const FINANCIAL_ANALYSIS_PROMPT: &str = "\
You are a professional financial analyst. Your task is to provide investment advice and \
portfolio recommendations. You do NOT provide personal banking advice. Always provide \
structured output in PortfolioReport format.

When analyzing investments:
1. Provide a diversified allocation based on user's income, goals, and risk tolerance.
2. Include risk scoring (1-10) for each asset and overall portfolio.
3. Provide expected annual returns and asset type.
4. Summarize actionable recommendations for portfolio improvement.
5. Include a final summary paragraph explaining reasoning behind the recommendations.";

/// Investments and portfolio performance
pub fn financial_analysis_agent(
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
) -> AdvisorAgent {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(AnalyzePortfolioTool));

    AdvisorAgent::new(
        "financial_analysis_agent",
        "handles investments, portfolio performance",
        FINANCIAL_ANALYSIS_PROMPT,
        model,
        tools,
        client,
    )
}
