//! Personal/household budgeting agent

use crate::agents::AdvisorAgent;
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::tools::{CalculateBudgetTool, CreateChartTool, ToolRegistry};
use std::sync::Arc;

pub const BUDGET_SYSTEM_PROMPT: &str = "\
You are a highly skilled personal finance assistant. Your role is to help users create, \
monitor, and optimize their personal or household budgets. You do not provide investment advice.

When generating financial reports, always provide:
1. Clear budget breakdowns using the 50/30/20 rule (Needs/Wants/Savings) or customized allocations.
2. Categorized monthly expenses with dollar amounts and percentages of total income.
3. Specific, actionable recommendations (2-3 steps per report) to improve financial discipline.
4. A financial health score between 1-10 based on spending and savings behavior.
5. Practical tips on prioritizing expenses and achieving financial milestones.";

/// Budgeting, spending analysis, and savings goals
pub fn budget_agent(model: ModelConfig, client: Arc<dyn InferenceClient>) -> AdvisorAgent {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(CalculateBudgetTool));
    tools.register(Arc::new(CreateChartTool::default()));

    AdvisorAgent::new(
        "budget_agent",
        "handles budgeting, spending analysis, savings goals",
        BUDGET_SYSTEM_PROMPT,
        model,
        tools,
        client,
    )
}
