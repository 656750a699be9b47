//! MSP Advisor Agents
//!
//! A multi-agent financial and growth advisor for managed service
//! providers. Specialized agents (budgeting, IT cost optimization,
//! portfolio analysis, client performance, sales, visualization) wrap a
//! hosted model with deterministic tools; an orchestrator exposes them as
//! callable units and synthesizes their reports into one answer.

pub mod agents;
pub mod api;
pub mod bedrock;
pub mod error;
pub mod orchestrator;
pub mod reports;
pub mod tools;

pub use bedrock::{BedrockClient, InferenceClient, MockInferenceClient, ModelConfig};
pub use error::{AdvisorError, Result};
pub use orchestrator::{AdvisorResponse, Orchestrator};
