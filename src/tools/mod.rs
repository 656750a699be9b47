//! Tool trait and registry
//!
//! Tools are the deterministic, side-effect-free calculations offered to
//! each agent. The hosted model decides whether to call them; execution
//! itself never involves the model.

pub mod budget;
pub mod chart;
pub mod optimizer;
pub mod portfolio;

pub use budget::CalculateBudgetTool;
pub use chart::CreateChartTool;
pub use optimizer::OptimizeItBudgetTool;
pub use portfolio::AnalyzePortfolioTool;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Input passed to a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    pub parameters: serde_json::Value,
}

/// Output produced by a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
}

/// Trait for a single tool (deterministic execution)
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput>;
}

/// Tool registry for looking up and executing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn list(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// "name – description" lines for embedding in a system prompt
    pub fn descriptions(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .tools
            .values()
            .map(|tool| format!("{} - {}", tool.name(), tool.description()))
            .collect();
        lines.sort();
        lines
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a currency figure to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a dollar amount with comma grouping, e.g. 6000.0 -> "6,000"
pub(crate) fn format_usd(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(6000.0, 0), "6,000");
        assert_eq!(format_usd(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_usd(999.0, 0), "999");
        assert_eq!(format_usd(0.0, 2), "0.00");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(1000.0), 1000.0);
    }

    #[test]
    fn test_registry_lookup_and_descriptions() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CalculateBudgetTool));

        assert!(registry.get("calculate_budget").is_some());
        assert!(registry.get("unknown_tool").is_none());
        assert_eq!(registry.descriptions().len(), 1);
        assert!(registry.descriptions()[0].starts_with("calculate_budget - "));
    }
}
