//! 50/30/20 budget split calculator

use crate::error::AdvisorError;
use crate::tools::{format_usd, Tool, ToolInput, ToolOutput};
use crate::Result;
use serde_json::json;

/// Needs/wants/savings split of a monthly income
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSplit {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

/// Split a monthly income by the 50/30/20 rule
pub fn split_income(monthly_income: f64) -> Result<BudgetSplit> {
    if monthly_income < 0.0 {
        return Err(AdvisorError::InvalidInput(format!(
            "monthly_income must be non-negative, got {}",
            monthly_income
        )));
    }

    Ok(BudgetSplit {
        needs: monthly_income * 0.50,
        wants: monthly_income * 0.30,
        savings: monthly_income * 0.20,
    })
}

/// Human-readable 50/30/20 breakdown for a monthly income
pub fn calculate_budget(monthly_income: f64) -> Result<String> {
    let split = split_income(monthly_income)?;

    Ok(format!(
        "💰 Budget for ${}/month:\n• Needs: ${} (50%)\n• Wants: ${} (30%)\n• Savings: ${} (20%)",
        format_usd(monthly_income, 0),
        format_usd(split.needs, 0),
        format_usd(split.wants, 0),
        format_usd(split.savings, 0),
    ))
}

pub struct CalculateBudgetTool;

#[async_trait::async_trait]
impl Tool for CalculateBudgetTool {
    fn name(&self) -> &'static str {
        "calculate_budget"
    }

    fn description(&self) -> &'static str {
        "Calculate a simple 50/30/20 budget breakdown from monthly income"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let monthly_income = input
            .parameters
            .get("monthly_income")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                AdvisorError::InvalidToolInput(
                    "Expected numeric 'monthly_income' in tool_input".to_string(),
                )
            })?;

        let split = split_income(monthly_income)?;
        let breakdown = calculate_budget(monthly_income)?;

        Ok(ToolOutput {
            success: true,
            data: json!({
                "breakdown": breakdown,
                "needs": split.needs,
                "wants": split.wants,
                "savings": split.savings,
            }),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sums_to_income() {
        for income in [0.0, 1.0, 6000.0, 123456.78] {
            let split = split_income(income).unwrap();
            let total = split.needs + split.wants + split.savings;
            assert!((total - income).abs() < 1e-9, "income {}", income);
        }
    }

    #[test]
    fn test_split_ratios() {
        let split = split_income(6000.0).unwrap();
        assert_eq!(split.needs, 3000.0);
        assert_eq!(split.wants, 1800.0);
        assert_eq!(split.savings, 1200.0);
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(matches!(
            split_income(-100.0),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_breakdown_formatting() {
        let text = calculate_budget(6000.0).unwrap();
        assert!(text.contains("$6,000/month"));
        assert!(text.contains("Needs: $3,000 (50%)"));
        assert!(text.contains("Savings: $1,200 (20%)"));
    }

    #[tokio::test]
    async fn test_tool_requires_income_parameter() {
        let tool = CalculateBudgetTool;
        let input = ToolInput {
            tool_name: "calculate_budget".to_string(),
            parameters: serde_json::json!({}),
        };
        assert!(tool.execute(&input).await.is_err());
    }

    #[tokio::test]
    async fn test_tool_returns_split_figures() {
        let tool = CalculateBudgetTool;
        let input = ToolInput {
            tool_name: "calculate_budget".to_string(),
            parameters: serde_json::json!({"monthly_income": 6000.0}),
        };
        let output = tool.execute(&input).await.unwrap();
        assert!(output.success);
        assert_eq!(output.data["needs"], 3000.0);
        assert_eq!(output.data["wants"], 1800.0);
        assert_eq!(output.data["savings"], 1200.0);
    }
}
