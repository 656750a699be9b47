//! IT budget optimizer
//!
//! Utilization-weighted cost reduction: spend on an underutilized item is
//! trimmed in proportion to how little of it is actually used.

use crate::error::AdvisorError;
use crate::reports::{BudgetOptimizationReport, CostItem};
use crate::tools::{format_usd, round2, Tool, ToolInput, ToolOutput};
use crate::Result;
use serde::{Deserialize, Serialize};

fn default_utilization() -> f64 {
    100.0
}

/// One line of IT spend with observed utilization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendItem {
    pub category: String,
    pub current_cost: f64,
    #[serde(default = "default_utilization")]
    pub utilization_percentage: f64,
}

/// Analyze IT spend and generate optimization recommendations.
///
/// An empty input is a valid degenerate case: all-zero totals, no
/// recommendations, summary still generated.
pub fn optimize_it_budget(spend_data: &[SpendItem]) -> Result<BudgetOptimizationReport> {
    let mut recommendations = Vec::with_capacity(spend_data.len());
    let mut total_spend = 0.0;
    let mut optimized_spend = 0.0;

    for item in spend_data {
        if item.current_cost < 0.0 {
            return Err(AdvisorError::InvalidInput(format!(
                "current_cost for '{}' must be non-negative, got {}",
                item.category, item.current_cost
            )));
        }
        if !(0.0..=100.0).contains(&item.utilization_percentage) {
            return Err(AdvisorError::InvalidInput(format!(
                "utilization_percentage for '{}' must be within 0..=100, got {}",
                item.category, item.utilization_percentage
            )));
        }

        let recommended_cost = item.current_cost * (item.utilization_percentage / 100.0);
        let savings_opportunity = item.current_cost - recommended_cost;

        total_spend += item.current_cost;
        optimized_spend += recommended_cost;

        recommendations.push(CostItem {
            category: item.category.clone(),
            current_cost: round2(item.current_cost),
            recommended_cost: round2(recommended_cost),
            savings_opportunity: round2(savings_opportunity),
        });
    }

    let summary = format!(
        "Total IT spend: ${}. Optimized spend: ${}. Potential savings: ${}. \
         Focus on reducing spend on underutilized software and renegotiating licenses.",
        format_usd(total_spend, 2),
        format_usd(optimized_spend, 2),
        format_usd(total_spend - optimized_spend, 2),
    );

    Ok(BudgetOptimizationReport {
        total_spend: round2(total_spend),
        optimized_spend: round2(optimized_spend),
        savings: round2(total_spend - optimized_spend),
        recommendations,
        summary,
    })
}

pub struct OptimizeItBudgetTool;

#[async_trait::async_trait]
impl Tool for OptimizeItBudgetTool {
    fn name(&self) -> &'static str {
        "optimize_it_budget"
    }

    fn description(&self) -> &'static str {
        "Analyze IT spend per category (cost + utilization) and recommend savings"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        // Accept either {"spend_data": [...]} or a bare array
        let raw = input
            .parameters
            .get("spend_data")
            .cloned()
            .unwrap_or_else(|| input.parameters.clone());

        let spend_data: Vec<SpendItem> = serde_json::from_value(raw).map_err(|e| {
            AdvisorError::InvalidToolInput(format!(
                "Expected 'spend_data' list of {{category, current_cost, utilization_percentage}}: {}",
                e
            ))
        })?;

        let report = optimize_it_budget(&spend_data)?;

        Ok(ToolOutput {
            success: true,
            data: serde_json::to_value(&report)?,
            error: None,
        })
    }
}
