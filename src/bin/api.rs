//! API server binary
//!
//! Serves the advisor over HTTP. Requires `BEDROCK_API_KEY` (or
//! `AWS_BEARER_TOKEN_BEDROCK`); `PORT` overrides the default 8080.

use msp_advisor_agents::api::start_server;
use msp_advisor_agents::{AdvisorError, BedrockClient, ModelConfig, Orchestrator, Result};
use std::env;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msp_advisor_agents=info,tower_http=info".into()),
        )
        .init();

    let client = BedrockClient::from_env().ok_or_else(|| {
        AdvisorError::RemoteService(
            "BEDROCK_API_KEY (or AWS_BEARER_TOKEN_BEDROCK) must be set".to_string(),
        )
    })?;

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let orchestrator = Arc::new(Orchestrator::new(ModelConfig::default(), Arc::new(client)));
    info!(port, "Starting advisor API server");

    start_server(orchestrator, port).await
}
