//! Agent configuration wrapper
//!
//! An agent is a system prompt plus model parameters plus a fixed set of
//! deterministic tools, bound into a callable unit. Reasoning and tool
//! selection are delegated to the hosted model; local code only executes
//! the tool the model names and parses the structured replies.

pub mod budget;
pub mod budget_optimization;
pub mod client_performance;
pub mod financial_analysis;
pub mod sales_marketing;
pub mod visualization;

pub use budget::budget_agent;
pub use budget_optimization::budget_optimization_agent;
pub use client_performance::client_performance_agent;
pub use financial_analysis::financial_analysis_agent;
pub use sales_marketing::sales_marketing_agent;
pub use visualization::visualization_agent;

use crate::bedrock::{InferenceClient, ModelConfig};
use crate::error::AdvisorError;
use crate::reports::Validate;
use crate::tools::{ToolInput, ToolRegistry};
use crate::Result;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A specialized advisor agent: configuration only, no local reasoning
pub struct AdvisorAgent {
    name: &'static str,
    description: &'static str,
    system_prompt: String,
    model: ModelConfig,
    tools: ToolRegistry,
    client: Arc<dyn InferenceClient>,
}

/// Tool call emitted by the model in free-text mode
#[derive(Debug, Deserialize)]
struct ToolCall {
    tool: String,
    #[serde(default)]
    input: serde_json::Value,
}

impl AdvisorAgent {
    pub fn new(
        name: &'static str,
        description: &'static str,
        system_prompt: impl Into<String>,
        model: ModelConfig,
        tools: ToolRegistry,
        client: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            name,
            description,
            system_prompt: system_prompt.into(),
            model,
            tools,
            client,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// System prompt with the tool list and tool-call protocol appended
    fn tool_aware_system_prompt(&self) -> String {
        if self.tools.is_empty() {
            return self.system_prompt.clone();
        }

        format!(
            "{}\n\nAvailable tools:\n- {}\n\n\
             To use a tool, reply ONLY with JSON: {{\"tool\": \"<name>\", \"input\": {{...}}}}.\n\
             Otherwise answer the user directly.",
            self.system_prompt,
            self.tools.descriptions().join("\n- "),
        )
    }

    /// Free-text query. When the model replies with a tool call, the tool
    /// is executed locally and the result is fed back for a final answer
    /// (a single tool round).
    pub async fn ask(&self, query: &str) -> Result<String> {
        info!(agent = self.name, "Agent query");

        let system_prompt = self.tool_aware_system_prompt();
        let reply = self
            .client
            .invoke(&self.model, &system_prompt, query)
            .await?;

        let Some(call) = try_parse_tool_call(&reply) else {
            return Ok(reply);
        };

        debug!(agent = self.name, tool = %call.tool, "Model requested a tool");

        let tool = self
            .tools
            .get(&call.tool)
            .ok_or_else(|| AdvisorError::ToolNotFound(call.tool.clone()))?;

        let output = tool
            .execute(&ToolInput {
                tool_name: call.tool.clone(),
                parameters: call.input,
            })
            .await?;

        let followup = format!(
            "User query: {}\n\nTool {} returned:\n{}\n\nAnswer the user using this result.",
            query,
            call.tool,
            serde_json::to_string_pretty(&output.data)?,
        );

        self.client
            .invoke(&self.model, &self.system_prompt, &followup)
            .await
    }

    /// Query with the response coerced into schema `T`.
    ///
    /// The JSON schema for `T` is embedded in the prompt; the reply is
    /// parsed (markdown fences tolerated) and range-validated. Any
    /// mismatch surfaces as a schema violation, never a partial report.
    pub async fn structured_output<T>(&self, query: &str) -> Result<T>
    where
        T: DeserializeOwned + JsonSchema + Validate,
    {
        info!(agent = self.name, "Structured output query");

        let schema = schemars::schema_for!(T);
        let prompt = format!(
            "{}\n\nRespond ONLY with a JSON object matching this schema (no prose):\n{}",
            query,
            serde_json::to_string_pretty(&schema)?,
        );

        let reply = self
            .client
            .invoke(&self.model, &self.system_prompt, &prompt)
            .await?;

        let report: T = parse_structured_reply(&reply)?;
        report.validate()?;
        Ok(report)
    }
}

/// Strip a leading/trailing markdown code fence from a model reply
pub(crate) fn extract_json(reply: &str) -> &str {
    reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Largest `{ ... }` block in the text, for replies that wrap JSON in prose
fn largest_brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn try_parse_tool_call(reply: &str) -> Option<ToolCall> {
    let cleaned = extract_json(reply);
    let call: ToolCall = serde_json::from_str(cleaned).ok()?;
    (!call.tool.is_empty()).then_some(call)
}

pub(crate) fn parse_structured_reply<T: DeserializeOwned>(reply: &str) -> Result<T> {
    let cleaned = extract_json(reply);

    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let block = largest_brace_block(cleaned).ok_or_else(|| {
                AdvisorError::SchemaViolation(format!(
                    "model reply is not valid JSON: {} | raw={}",
                    first_err, reply
                ))
            })?;
            serde_json::from_str(block).map_err(|e| {
                AdvisorError::SchemaViolation(format!(
                    "model reply does not match the requested schema: {} | raw={}",
                    e, reply
                ))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bedrock::MockInferenceClient;
    use crate::reports::FinancialReport;
    use crate::tools::CalculateBudgetTool;

    fn agent_with(replies: Vec<&str>, tools: ToolRegistry) -> AdvisorAgent {
        let client = Arc::new(MockInferenceClient::new(
            replies.into_iter().map(String::from).collect(),
        ));
        AdvisorAgent::new(
            "test_agent",
            "test agent",
            "You are a test agent.",
            ModelConfig::default(),
            tools,
            client,
        )
    }

    #[tokio::test]
    async fn test_ask_without_tool_call_passes_reply_through() {
        let agent = agent_with(vec!["Plain answer."], ToolRegistry::new());
        let answer = agent.ask("hello").await.unwrap();
        assert_eq!(answer, "Plain answer.");
    }

    #[tokio::test]
    async fn test_ask_executes_requested_tool_then_answers() {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(CalculateBudgetTool));

        let agent = agent_with(
            vec![
                r#"{"tool": "calculate_budget", "input": {"monthly_income": 6000.0}}"#,
                "Your needs budget is $3,000.",
            ],
            tools,
        );

        let answer = agent.ask("budget for $6000").await.unwrap();
        assert_eq!(answer, "Your needs budget is $3,000.");
    }

    #[tokio::test]
    async fn test_ask_unknown_tool_is_an_error() {
        let agent = agent_with(
            vec![r#"{"tool": "launch_rockets", "input": {}}"#],
            ToolRegistry::new(),
        );
        assert!(matches!(
            agent.ask("do something").await,
            Err(AdvisorError::ToolNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_structured_output_parses_fenced_reply() {
        let fenced = r#"```json
{
  "monthly_income": 6000.0,
  "budget_categories": [
    {"name": "Needs", "amount": 3000.0, "percentage": 50.0}
  ],
  "recommendations": ["Automate savings transfers"],
  "financial_health_score": 7
}
```"#;
        let agent = agent_with(vec![fenced], ToolRegistry::new());
        let report: FinancialReport = agent.structured_output("report please").await.unwrap();
        assert_eq!(report.monthly_income, 6000.0);
        assert_eq!(report.financial_health_score, 7);
    }

    #[tokio::test]
    async fn test_structured_output_rejects_prose_reply() {
        let agent = agent_with(vec!["I cannot produce a report."], ToolRegistry::new());
        let result: Result<FinancialReport> = agent.structured_output("report please").await;
        assert!(matches!(result, Err(AdvisorError::SchemaViolation(_))));
    }

    #[tokio::test]
    async fn test_structured_output_rejects_out_of_range_values() {
        let raw = r#"{
            "monthly_income": 6000.0,
            "budget_categories": [],
            "recommendations": [],
            "financial_health_score": 42
        }"#;
        let agent = agent_with(vec![raw], ToolRegistry::new());
        let result: Result<FinancialReport> = agent.structured_output("report please").await;
        assert!(matches!(result, Err(AdvisorError::SchemaViolation(_))));
    }

    #[test]
    fn test_extract_json_handles_fences_and_bare_json() {
        assert_eq!(extract_json("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json("{\"a\": 1}"), "{\"a\": 1}");
    }
}
