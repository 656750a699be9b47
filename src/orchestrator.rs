//! Orchestrator - routes a user query across the specialized agents
//!
//! The specialized agents are exposed to the hosted model as callable
//! tools. Which agents run, and how their reports are merged, is decided
//! by the model; local code implements only the mechanical loop:
//! ROUTE → EXECUTE AGENTS → SYNTHESIZE.

use crate::agents::{
    budget_agent, budget_optimization_agent, client_performance_agent, financial_analysis_agent,
    parse_structured_reply, sales_marketing_agent, visualization_agent, AdvisorAgent,
};
use crate::bedrock::{InferenceClient, ModelConfig};
use crate::error::AdvisorError;
use crate::reports::{
    BudgetOptimizationReport, ClientPerformanceReport, FinancialReport, PortfolioReport,
    SalesRecommendationReport,
};
use crate::tools::ToolInput;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const ORCHESTRATOR_PROMPT: &str = "\
You are a comprehensive MSP financial and growth advisor orchestrator.
Your specialized agents are:
1. **budget_agent** - handles budgeting, spending analysis, savings goals
2. **financial_analysis_agent** - handles investments, portfolio performance
3. **budget_optimization_agent** - analyzes IT spend and license utilization for savings
4. **client_performance_agent** - tracks client profitability and engagement
5. **visualization_agent** - creates charts, dashboards, and visual insights
6. **sales_marketing_agent** - provides upsell, cross-sell, and campaign recommendations

Guidelines:
- Determine which agent(s) to use per user query
- Call relevant agent(s) with focused queries
- Synthesize outputs into coherent structured reports
- Maintain a professional and helpful tone
- Include actionable next steps wherever possible";

/// One routed agent invocation as emitted by the model
#[derive(Debug, Clone, Deserialize)]
struct RoutedCall {
    agent: String,
    #[serde(default)]
    query: String,
    /// Category -> value mapping for the visualization agent
    #[serde(default)]
    data: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    chart_title: Option<String>,
}

/// Report produced by one specialized agent during orchestration
#[derive(Debug, Clone, Serialize)]
pub struct AgentResult {
    pub agent: String,
    pub query: String,
    pub report: serde_json::Value,
}

/// Final synthesized response returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorResponse {
    pub request_id: Uuid,
    pub answer: String,
    pub agent_results: Vec<AgentResult>,
    pub trace: Vec<String>,
}

/// Top-level agent configuration wrapping the specialized agents as tools
pub struct Orchestrator {
    model: ModelConfig,
    client: Arc<dyn InferenceClient>,
    agents: Vec<AdvisorAgent>,
}

impl Orchestrator {
    /// Build the orchestrator with the full specialized agent set, all
    /// sharing one model configuration and inference client.
    pub fn new(model: ModelConfig, client: Arc<dyn InferenceClient>) -> Self {
        let agents = vec![
            budget_agent(model.clone(), client.clone()),
            financial_analysis_agent(model.clone(), client.clone()),
            budget_optimization_agent(model.clone(), client.clone()),
            client_performance_agent(model.clone(), client.clone()),
            visualization_agent(model.clone(), client.clone()),
            sales_marketing_agent(model.clone(), client.clone()),
        ];

        Self {
            model,
            client,
            agents,
        }
    }

    pub fn agent_names(&self) -> Vec<&'static str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    fn agent(&self, name: &str) -> Option<&AdvisorAgent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    fn routing_prompt(&self) -> String {
        let agent_list = self
            .agents
            .iter()
            .map(|a| format!("{} - {}", a.name(), a.description()))
            .collect::<Vec<_>>()
            .join("\n- ");

        format!(
            "{}\n\nAvailable agent tools:\n- {}\n\n\
             Return a JSON array of agent calls, one per agent you want to invoke:\n\
             [\n  {{\"agent\": \"budget_agent\", \"query\": \"...\"}}\n]\n\
             For visualization_agent include \"data\" (category -> value) and \"chart_title\".\n\
             Return ONLY valid JSON, no explanation text. Return [] if no agent applies.",
            ORCHESTRATOR_PROMPT, agent_list,
        )
    }

    /// Run one routed agent call and return its report as JSON
    async fn execute_call(&self, call: &RoutedCall) -> Result<serde_json::Value> {
        let agent = self
            .agent(&call.agent)
            .ok_or_else(|| AdvisorError::ToolNotFound(call.agent.clone()))?;

        let report = match agent.name() {
            "budget_agent" => {
                let report: FinancialReport = agent.structured_output(&call.query).await?;
                serde_json::to_value(report)?
            }
            "financial_analysis_agent" => {
                let report: PortfolioReport = agent.structured_output(&call.query).await?;
                serde_json::to_value(report)?
            }
            "budget_optimization_agent" => {
                let report: BudgetOptimizationReport =
                    agent.structured_output(&call.query).await?;
                serde_json::to_value(report)?
            }
            "client_performance_agent" => {
                let report: ClientPerformanceReport = agent.structured_output(&call.query).await?;
                serde_json::to_value(report)?
            }
            "sales_marketing_agent" => {
                let report: SalesRecommendationReport =
                    agent.structured_output(&call.query).await?;
                serde_json::to_value(report)?
            }
            "visualization_agent" => self.execute_visualization(agent, call).await?,
            other => {
                return Err(AdvisorError::ToolNotFound(other.to_string()));
            }
        };

        Ok(report)
    }

    /// The visualization agent is invoked with data, not a free-text query:
    /// when the router supplies a data mapping, the chart tool runs directly.
    async fn execute_visualization(
        &self,
        agent: &AdvisorAgent,
        call: &RoutedCall,
    ) -> Result<serde_json::Value> {
        match &call.data {
            Some(data) => {
                let tool = agent
                    .tools()
                    .get("create_chart")
                    .ok_or_else(|| AdvisorError::ToolNotFound("create_chart".to_string()))?;

                let title = call.chart_title.as_deref().unwrap_or("Chart");
                let output = tool
                    .execute(&ToolInput {
                        tool_name: "create_chart".to_string(),
                        parameters: serde_json::json!({
                            "data": data,
                            "chart_title": title,
                        }),
                    })
                    .await?;
                Ok(output.data)
            }
            None => {
                let answer = agent.ask(&call.query).await?;
                Ok(serde_json::json!({ "answer": answer }))
            }
        }
    }

    /// Route a user query, execute the selected agents, and synthesize a
    /// combined answer.
    pub async fn advise(&self, query: &str) -> Result<AdvisorResponse> {
        let request_id = Uuid::new_v4();
        let mut trace = Vec::new();

        info!(%request_id, query, "Orchestrator: routing query");
        trace.push("INPUT: Query received".to_string());

        // === ROUTE ===
        let routing_reply = self
            .client
            .invoke(&self.model, &self.routing_prompt(), query)
            .await?;
        let calls: Vec<RoutedCall> = parse_structured_reply(&routing_reply)?;

        trace.push(format!("ROUTE: {} agent call(s) selected", calls.len()));

        // Model answered that no specialized agent applies; answer directly.
        if calls.is_empty() {
            let answer = self
                .client
                .invoke(&self.model, ORCHESTRATOR_PROMPT, query)
                .await?;
            trace.push("COMPLETE: Answered without specialized agents".to_string());

            return Ok(AdvisorResponse {
                request_id,
                answer,
                agent_results: Vec::new(),
                trace,
            });
        }

        // === EXECUTE AGENTS ===
        let mut agent_results = Vec::with_capacity(calls.len());

        for call in &calls {
            if self.agent(&call.agent).is_none() {
                warn!(agent = %call.agent, "Router selected an unknown agent, skipping");
                trace.push(format!("SKIP: Unknown agent '{}'", call.agent));
                continue;
            }

            let report = self.execute_call(call).await?;
            trace.push(format!("EXECUTE: {} completed", call.agent));

            agent_results.push(AgentResult {
                agent: call.agent.clone(),
                query: call.query.clone(),
                report,
            });
        }

        // === SYNTHESIZE ===
        let report_sections = agent_results
            .iter()
            .map(|result| {
                Ok(format!(
                    "[{}]\n{}",
                    result.agent,
                    serde_json::to_string_pretty(&result.report)?
                ))
            })
            .collect::<Result<Vec<_>>>()?
            .join("\n\n");

        let synthesis_prompt = format!(
            "Original query: {}\n\nSpecialized agent reports:\n{}\n\n\
             Synthesize a coherent answer with actionable next steps.",
            query, report_sections,
        );

        let answer = self
            .client
            .invoke(&self.model, ORCHESTRATOR_PROMPT, &synthesis_prompt)
            .await?;
        trace.push("SYNTHESIZE: Combined answer generated".to_string());

        info!(%request_id, agents = agent_results.len(), "Orchestration complete");

        Ok(AdvisorResponse {
            request_id,
            answer,
            agent_results,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bedrock::MockInferenceClient;

    const BUDGET_REPORT: &str = r#"{
        "monthly_income": 6000.0,
        "budget_categories": [
            {"name": "Needs", "amount": 3000.0, "percentage": 50.0},
            {"name": "Wants", "amount": 1800.0, "percentage": 30.0},
            {"name": "Savings", "amount": 1200.0, "percentage": 20.0}
        ],
        "recommendations": ["Automate the $500 investment transfer"],
        "financial_health_score": 8
    }"#;

    const SALES_REPORT: &str = r#"{
        "recommendations": ["Upsell premium support packages to top 3 clients"],
        "priority_actions": ["Upsell top clients"]
    }"#;

    fn orchestrator_with(replies: Vec<&str>) -> (Orchestrator, Arc<MockInferenceClient>) {
        let client = Arc::new(MockInferenceClient::new(
            replies.into_iter().map(String::from).collect(),
        ));
        let orchestrator = Orchestrator::new(ModelConfig::default(), client.clone());
        (orchestrator, client)
    }

    #[tokio::test]
    async fn test_advise_executes_routed_agents_and_synthesizes() {
        let routing = r#"[
            {"agent": "budget_agent", "query": "budget for $6000/month"},
            {"agent": "sales_marketing_agent", "query": "marketing actions for MSP clients"}
        ]"#;
        let (orchestrator, client) = orchestrator_with(vec![
            routing,
            BUDGET_REPORT,
            SALES_REPORT,
            "Here is your combined financial and growth plan.",
        ]);

        let response = orchestrator.advise("help me budget and grow").await.unwrap();

        assert_eq!(response.answer, "Here is your combined financial and growth plan.");
        assert_eq!(response.agent_results.len(), 2);
        assert_eq!(response.agent_results[0].agent, "budget_agent");
        assert_eq!(response.agent_results[1].agent, "sales_marketing_agent");
        assert!(response.trace.iter().any(|t| t.starts_with("SYNTHESIZE")));

        // Synthesis prompt carries both agent reports
        let prompts = client.recorded_prompts();
        let synthesis = prompts.last().unwrap();
        assert!(synthesis.contains("[budget_agent]"));
        assert!(synthesis.contains("[sales_marketing_agent]"));
    }

    #[tokio::test]
    async fn test_advise_falls_back_to_direct_answer() {
        let (orchestrator, _) =
            orchestrator_with(vec!["[]", "MSPs typically aim for 60% gross margin."]);

        let response = orchestrator.advise("what margin is typical?").await.unwrap();
        assert!(response.agent_results.is_empty());
        assert_eq!(response.answer, "MSPs typically aim for 60% gross margin.");
    }

    #[tokio::test]
    async fn test_advise_skips_unknown_agents() {
        let routing = r#"[
            {"agent": "forecasting_agent", "query": "forecast revenue"},
            {"agent": "sales_marketing_agent", "query": "campaign ideas"}
        ]"#;
        let (orchestrator, _) =
            orchestrator_with(vec![routing, SALES_REPORT, "Focus on upsells."]);

        let response = orchestrator.advise("forecast and grow").await.unwrap();
        assert_eq!(response.agent_results.len(), 1);
        assert_eq!(response.agent_results[0].agent, "sales_marketing_agent");
        assert!(response.trace.iter().any(|t| t.contains("Unknown agent")));
    }

    #[tokio::test]
    async fn test_advise_surfaces_schema_violations() {
        let routing = r#"[{"agent": "budget_agent", "query": "budget"}]"#;
        let (orchestrator, _) = orchestrator_with(vec![routing, "not json at all"]);

        let result = orchestrator.advise("budget please").await;
        assert!(matches!(result, Err(AdvisorError::SchemaViolation(_))));
    }

    #[tokio::test]
    async fn test_unparseable_routing_is_schema_violation() {
        let (orchestrator, _) = orchestrator_with(vec!["I think you should budget."]);
        let result = orchestrator.advise("budget please").await;
        assert!(matches!(result, Err(AdvisorError::SchemaViolation(_))));
    }

    #[test]
    fn test_agent_names_cover_all_specializations() {
        let client = Arc::new(MockInferenceClient::new(vec![]));
        let orchestrator = Orchestrator::new(ModelConfig::default(), client);
        let names = orchestrator.agent_names();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"budget_agent"));
        assert!(names.contains(&"visualization_agent"));
    }
}
