//! Demo binary: run one advisory query end to end
//!
//! With `BEDROCK_API_KEY` set, the real Bedrock runtime answers. Without
//! it, a scripted client replays a representative session so the full
//! orchestration path can be exercised offline.

use msp_advisor_agents::{
    BedrockClient, InferenceClient, MockInferenceClient, ModelConfig, Orchestrator, Result,
};
use std::sync::Arc;
use tracing::info;

const DEMO_QUERY: &str = "I earn $6000/month and want to save $500 for investments. \
Help me create a budget, suggest investments, and recommend marketing actions for my MSP clients.";

fn scripted_client() -> MockInferenceClient {
    let routing = r#"[
        {"agent": "budget_agent", "query": "Create a budget for $6000/month with $500 for investments"},
        {"agent": "financial_analysis_agent", "query": "Suggest investments for $500/month"},
        {"agent": "sales_marketing_agent", "query": "Recommend marketing actions for MSP clients"}
    ]"#;

    let budget_report = r#"{
        "monthly_income": 6000.0,
        "budget_categories": [
            {"name": "Needs", "amount": 3000.0, "percentage": 50.0},
            {"name": "Wants", "amount": 1800.0, "percentage": 30.0},
            {"name": "Savings", "amount": 1200.0, "percentage": 20.0}
        ],
        "recommendations": ["Automate a $500 monthly transfer into your investment account"],
        "financial_health_score": 8
    }"#;

    let portfolio_report = r#"{
        "portfolio_value": 9500.0,
        "recommendations": [
            {"asset_name": "S&P 500 ETF", "asset_type": "ETF", "allocation_percentage": 50.0,
             "expected_return": 8.0, "risk_score": 5},
            {"asset_name": "Bond Fund", "asset_type": "Bond", "allocation_percentage": 30.0,
             "expected_return": 4.0, "risk_score": 2},
            {"asset_name": "Tech Stocks", "asset_type": "Stock", "allocation_percentage": 20.0,
             "expected_return": 12.0, "risk_score": 8}
        ],
        "overall_risk_score": 5,
        "summary": "Balanced allocation with moderate risk suited to steady monthly contributions."
    }"#;

    let sales_report = r#"{
        "recommendations": [
            "Upsell premium support packages to your top 3 clients",
            "Launch a referral program with a one-month service credit"
        ],
        "priority_actions": ["Schedule quarterly business reviews with top clients"]
    }"#;

    let synthesis = "With $6,000/month, allocate $3,000 to needs, $1,800 to wants, and \
$1,200 to savings, automating $500 of that into a balanced ETF/bond portfolio. \
On the growth side, start with premium support upsells to your top clients and a referral program.";

    MockInferenceClient::new(vec![
        routing.to_string(),
        budget_report.to_string(),
        portfolio_report.to_string(),
        sales_report.to_string(),
        synthesis.to_string(),
    ])
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msp_advisor_agents=info".into()),
        )
        .init();

    let client: Arc<dyn InferenceClient> = match BedrockClient::from_env() {
        Some(bedrock) => {
            info!("Using Bedrock runtime client");
            Arc::new(bedrock)
        }
        None => {
            info!("BEDROCK_API_KEY not set, using scripted client");
            Arc::new(scripted_client())
        }
    };

    let orchestrator = Orchestrator::new(ModelConfig::default(), client);

    println!("Query: {}\n", DEMO_QUERY);
    let response = orchestrator.advise(DEMO_QUERY).await?;

    println!("=== Answer ===\n{}\n", response.answer);

    for result in &response.agent_results {
        println!("=== {} ===", result.agent);
        println!("{}\n", serde_json::to_string_pretty(&result.report)?);
    }

    println!("=== Trace ===");
    for entry in &response.trace {
        println!("  {}", entry);
    }

    Ok(())
}
