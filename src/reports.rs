//! Typed report contracts returned by the advisor agents
//!
//! Every report is a request-scoped value object: built either by a
//! deterministic helper or parsed out of the hosted model's structured
//! response, handed back to the caller, then discarded. Range checks live
//! here so a malformed model reply surfaces as a schema violation instead
//! of leaking into report synthesis.

use crate::error::AdvisorError;
use crate::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sentinel chart path returned when no data was supplied
pub const NO_DATA_SENTINEL: &str = "No data provided";

/// Validation hook applied after deserializing a structured model response
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

//
// ================= Budgeting =================
//

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BudgetCategory {
    /// Budget category name
    pub name: String,
    /// Dollar amount for this category
    pub amount: f64,
    /// Percentage of total income for this category
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinancialReport {
    /// Total monthly income of the user
    pub monthly_income: f64,
    /// Budget categories with allocations
    pub budget_categories: Vec<BudgetCategory>,
    /// Actionable recommendations for improving financial health
    pub recommendations: Vec<String>,
    /// Financial health score from 1 to 10
    pub financial_health_score: i32,
}

impl Validate for FinancialReport {
    fn validate(&self) -> Result<()> {
        if self.monthly_income < 0.0 {
            return Err(AdvisorError::SchemaViolation(
                "monthly_income must be non-negative".to_string(),
            ));
        }
        if !(1..=10).contains(&self.financial_health_score) {
            return Err(AdvisorError::SchemaViolation(format!(
                "financial_health_score {} outside 1..=10",
                self.financial_health_score
            )));
        }
        for category in &self.budget_categories {
            if !(0.0..=100.0).contains(&category.percentage) {
                return Err(AdvisorError::SchemaViolation(format!(
                    "category '{}' percentage {} outside 0..=100",
                    category.name, category.percentage
                )));
            }
        }
        Ok(())
    }
}

//
// ================= IT Budget Optimization =================
//

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CostItem {
    /// Category of IT spend or software
    pub category: String,
    /// Current spend in USD
    pub current_cost: f64,
    /// Optimized/recommended spend in USD
    pub recommended_cost: f64,
    /// Potential savings in USD
    pub savings_opportunity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BudgetOptimizationReport {
    /// Total current IT spend
    pub total_spend: f64,
    /// Total optimized IT spend
    pub optimized_spend: f64,
    /// Total potential savings
    pub savings: f64,
    /// Detailed cost-saving recommendations per category
    pub recommendations: Vec<CostItem>,
    /// Summary of optimization insights and action items
    pub summary: String,
}

impl Validate for BudgetOptimizationReport {
    fn validate(&self) -> Result<()> {
        if self.total_spend < 0.0 || self.optimized_spend < 0.0 {
            return Err(AdvisorError::SchemaViolation(
                "spend totals must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

//
// ================= Investments =================
//

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InvestmentRecommendation {
    /// Name of the investment asset (stock, bond, ETF, etc.)
    pub asset_name: String,
    /// Type of asset, e.g. Stock, Bond, ETF, Mutual Fund
    pub asset_type: String,
    /// Recommended allocation as percentage of portfolio
    pub allocation_percentage: f64,
    /// Expected annual return in percentage
    pub expected_return: f64,
    /// Risk score from 1 (low) to 10 (high)
    pub risk_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PortfolioReport {
    /// Total value of the user's investment portfolio
    pub portfolio_value: f64,
    /// List of investment recommendations
    pub recommendations: Vec<InvestmentRecommendation>,
    /// Overall portfolio risk score
    pub overall_risk_score: i32,
    /// Summary of portfolio analysis and suggestions
    pub summary: String,
}

impl Validate for PortfolioReport {
    fn validate(&self) -> Result<()> {
        if self.portfolio_value < 0.0 {
            return Err(AdvisorError::SchemaViolation(
                "portfolio_value must be non-negative".to_string(),
            ));
        }
        if !(1..=10).contains(&self.overall_risk_score) {
            return Err(AdvisorError::SchemaViolation(format!(
                "overall_risk_score {} outside 1..=10",
                self.overall_risk_score
            )));
        }
        for rec in &self.recommendations {
            if !(0.0..=100.0).contains(&rec.allocation_percentage) {
                return Err(AdvisorError::SchemaViolation(format!(
                    "allocation for '{}' outside 0..=100",
                    rec.asset_name
                )));
            }
            if !(1..=10).contains(&rec.risk_score) {
                return Err(AdvisorError::SchemaViolation(format!(
                    "risk_score for '{}' outside 1..=10",
                    rec.asset_name
                )));
            }
        }
        Ok(())
    }
}

//
// ================= Client Performance =================
//

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClientMetric {
    /// Client organization name
    pub client_name: String,
    /// Monthly revenue from this client in USD
    pub monthly_revenue: f64,
    /// Monthly cost to serve this client in USD
    pub monthly_cost: f64,
    /// Profit margin as a percentage of revenue
    pub profit_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClientPerformanceReport {
    /// Per-client profitability metrics
    pub clients: Vec<ClientMetric>,
    /// Names of the most profitable clients
    pub top_performers: Vec<String>,
    /// Summary of client profitability and engagement
    pub summary: String,
}

impl Validate for ClientPerformanceReport {
    fn validate(&self) -> Result<()> {
        for client in &self.clients {
            if client.monthly_revenue < 0.0 || client.monthly_cost < 0.0 {
                return Err(AdvisorError::SchemaViolation(format!(
                    "negative revenue or cost for client '{}'",
                    client.client_name
                )));
            }
        }
        Ok(())
    }
}

//
// ================= Sales & Marketing =================
//

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SalesRecommendationReport {
    /// Actionable sales/marketing recommendations
    pub recommendations: Vec<String>,
    /// High-priority actions for MSP growth
    pub priority_actions: Vec<String>,
}

impl Validate for SalesRecommendationReport {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

//
// ================= Visualization =================
//

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChartOutput {
    /// Title of the generated chart
    pub chart_title: String,
    /// Path of the saved chart image, or the no-data sentinel
    pub chart_path: String,
}

impl Validate for ChartOutput {
    fn validate(&self) -> Result<()> {
        if self.chart_path.is_empty() {
            return Err(AdvisorError::SchemaViolation(
                "chart_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_report_score_range() {
        let report = FinancialReport {
            monthly_income: 6000.0,
            budget_categories: vec![BudgetCategory {
                name: "Needs".to_string(),
                amount: 3000.0,
                percentage: 50.0,
            }],
            recommendations: vec!["Track dining expenses".to_string()],
            financial_health_score: 7,
        };
        assert!(report.validate().is_ok());

        let mut bad = report.clone();
        bad.financial_health_score = 11;
        assert!(matches!(
            bad.validate(),
            Err(AdvisorError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_portfolio_report_allocation_range() {
        let report = PortfolioReport {
            portfolio_value: 9500.0,
            recommendations: vec![InvestmentRecommendation {
                asset_name: "S&P 500 ETF".to_string(),
                asset_type: "ETF".to_string(),
                allocation_percentage: 120.0,
                expected_return: 8.0,
                risk_score: 5,
            }],
            overall_risk_score: 5,
            summary: "diversify".to_string(),
        };
        assert!(report.validate().is_err());
    }

    #[test]
    fn test_report_deserializes_from_model_reply() {
        // Shape a structured-output reply would carry
        let raw = r#"{
            "monthly_income": 6000.0,
            "budget_categories": [
                {"name": "Needs", "amount": 3000.0, "percentage": 50.0},
                {"name": "Wants", "amount": 1800.0, "percentage": 30.0},
                {"name": "Savings", "amount": 1200.0, "percentage": 20.0}
            ],
            "recommendations": ["Cut dining out to $500"],
            "financial_health_score": 8
        }"#;

        let report: FinancialReport = serde_json::from_str(raw).unwrap();
        assert!(report.validate().is_ok());
        assert_eq!(report.budget_categories.len(), 3);
        let total: f64 = report
            .budget_categories
            .iter()
            .map(|c| c.percentage)
            .sum();
        assert!((total - 100.0).abs() < f64::EPSILON);
    }
}
