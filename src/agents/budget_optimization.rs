//! IT budget optimization agent

use crate::agents::AdvisorAgent;
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::tools::{OptimizeItBudgetTool, ToolRegistry};
use std::sync::Arc;

pub const BUDGET_OPTIMIZATION_PROMPT: &str = "\
You are an IT budget optimization expert for MSPs and IT teams. Your goal is to analyze \
software, licenses, and departmental spend to find inefficiencies and recommend cost savings.

When analyzing budgets:
1. Identify underutilized software or licenses.
2. Detect anomalies or overspending in categories.
3. Suggest actionable cost reduction steps.
4. Provide structured output in BudgetOptimizationReport format.
5. Maintain a professional, concise, and analytical tone.";

/// IT spend analysis and cost-saving recommendations
pub fn budget_optimization_agent(
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
) -> AdvisorAgent {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(OptimizeItBudgetTool));

    AdvisorAgent::new(
        "budget_optimization_agent",
        "analyzes IT spend and license utilization to find cost savings",
        BUDGET_OPTIMIZATION_PROMPT,
        model,
        tools,
        client,
    )
}
