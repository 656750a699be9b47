//! Portfolio analyzer (demo/static)
//!
//! The recommendation list is fixed sample data and the overall risk score
//! is a constant. This mirrors the placeholder behavior of the system being
//! reproduced; only the portfolio value is computed from the inputs. Do not
//! mistake this for real allocation logic.

use crate::error::AdvisorError;
use crate::reports::{InvestmentRecommendation, PortfolioReport};
use crate::tools::{Tool, ToolInput, ToolOutput};
use crate::Result;
use std::collections::BTreeMap;

/// Constant overall risk score of the placeholder analysis
pub const STATIC_OVERALL_RISK_SCORE: i32 = 5;

fn static_recommendations() -> Vec<InvestmentRecommendation> {
    vec![
        InvestmentRecommendation {
            asset_name: "S&P 500 ETF".to_string(),
            asset_type: "ETF".to_string(),
            allocation_percentage: 50.0,
            expected_return: 8.0,
            risk_score: 5,
        },
        InvestmentRecommendation {
            asset_name: "Bond Fund".to_string(),
            asset_type: "Bond".to_string(),
            allocation_percentage: 30.0,
            expected_return: 4.0,
            risk_score: 2,
        },
        InvestmentRecommendation {
            asset_name: "Tech Stocks".to_string(),
            asset_type: "Stock".to_string(),
            allocation_percentage: 20.0,
            expected_return: 12.0,
            risk_score: 8,
        },
    ]
}

/// Analyze an existing portfolio and suggest improvements.
///
/// `portfolio_value` is the sum of current holdings plus the monthly
/// investment; everything else in the report is static sample data.
pub fn analyze_portfolio(
    current_portfolio: &BTreeMap<String, f64>,
    monthly_investment: f64,
    risk_tolerance: &str,
) -> Result<PortfolioReport> {
    if monthly_investment < 0.0 {
        return Err(AdvisorError::InvalidInput(format!(
            "monthly_investment must be non-negative, got {}",
            monthly_investment
        )));
    }
    for (asset, amount) in current_portfolio {
        if *amount < 0.0 {
            return Err(AdvisorError::InvalidInput(format!(
                "holding '{}' must be non-negative, got {}",
                asset, amount
            )));
        }
    }

    let portfolio_value: f64 = current_portfolio.values().sum::<f64>() + monthly_investment;

    Ok(PortfolioReport {
        portfolio_value,
        recommendations: static_recommendations(),
        overall_risk_score: STATIC_OVERALL_RISK_SCORE,
        summary: format!(
            "Based on your current portfolio and risk tolerance ({}), we recommend \
             diversifying across ETFs, Bonds, and selected Stocks to balance risk and returns.",
            risk_tolerance
        ),
    })
}

pub struct AnalyzePortfolioTool;

#[async_trait::async_trait]
impl Tool for AnalyzePortfolioTool {
    fn name(&self) -> &'static str {
        "analyze_portfolio"
    }

    fn description(&self) -> &'static str {
        "Analyze current holdings plus monthly investment and suggest an allocation"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let current_portfolio: BTreeMap<String, f64> = input
            .parameters
            .get("current_portfolio")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                AdvisorError::InvalidToolInput(format!(
                    "Expected 'current_portfolio' map of asset -> amount: {}",
                    e
                ))
            })?
            .unwrap_or_default();

        let monthly_investment = input
            .parameters
            .get("monthly_investment")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        let risk_tolerance = input
            .parameters
            .get("risk_tolerance")
            .and_then(|v| v.as_str())
            .unwrap_or("medium");

        let report = analyze_portfolio(&current_portfolio, monthly_investment, risk_tolerance)?;

        Ok(ToolOutput {
            success: true,
            data: serde_json::to_value(&report)?,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_portfolio() -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("Cash".to_string(), 2000.0),
            ("S&P 500 ETF".to_string(), 5000.0),
            ("Bonds".to_string(), 2000.0),
        ])
    }

    #[test]
    fn test_portfolio_value_is_sum_plus_monthly() {
        let report = analyze_portfolio(&demo_portfolio(), 500.0, "medium").unwrap();
        assert_eq!(report.portfolio_value, 9500.0);
    }

    #[test]
    fn test_allocations_sum_to_100() {
        let report = analyze_portfolio(&demo_portfolio(), 0.0, "low").unwrap();
        let total: f64 = report
            .recommendations
            .iter()
            .map(|r| r.allocation_percentage)
            .sum();
        assert!((total - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_static_risk_and_summary() {
        let report = analyze_portfolio(&demo_portfolio(), 500.0, "high").unwrap();
        assert_eq!(report.overall_risk_score, STATIC_OVERALL_RISK_SCORE);
        assert!(report.summary.contains("risk tolerance (high)"));
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn test_empty_portfolio_is_just_monthly() {
        let report = analyze_portfolio(&BTreeMap::new(), 500.0, "medium").unwrap();
        assert_eq!(report.portfolio_value, 500.0);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(analyze_portfolio(&demo_portfolio(), -1.0, "medium").is_err());

        let bad = BTreeMap::from([("Cash".to_string(), -100.0)]);
        assert!(analyze_portfolio(&bad, 0.0, "medium").is_err());
    }

    #[tokio::test]
    async fn test_tool_parses_parameters() {
        let tool = AnalyzePortfolioTool;
        let input = ToolInput {
            tool_name: "analyze_portfolio".to_string(),
            parameters: serde_json::json!({
                "current_portfolio": {"Cash": 2000.0, "Bonds": 2000.0},
                "monthly_investment": 500.0,
                "risk_tolerance": "medium"
            }),
        };

        let output = tool.execute(&input).await.unwrap();
        assert_eq!(output.data["portfolio_value"], 4500.0);
        assert_eq!(output.data["overall_risk_score"], 5);
    }
}
