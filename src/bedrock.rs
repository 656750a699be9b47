//! Bedrock runtime client for hosted model inference
//!
//! The hosted model is an injected collaborator behind the narrow
//! `InferenceClient` trait. Uses a long-lived reqwest::Client for
//! connection pooling, with an explicit request timeout and a bounded
//! retry with exponential backoff for transient failures.

use crate::error::AdvisorError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::env;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info, warn};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Hosted model parameters, passed explicitly into each agent constructor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_id: String,
    pub region: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "us.anthropic.claude-3-7-sonnet-20250219-v1:0".to_string(),
            region: env::var("BEDROCK_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
            // Deterministic sampling for financial advice
            temperature: 0.0,
            max_tokens: 2048,
        }
    }
}

/// Narrow interface to the hosted inference endpoint
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Invoke the model with a system prompt and user prompt, returning
    /// the raw text of the reply.
    async fn invoke(
        &self,
        model: &ModelConfig,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String>;
}

/// Reusable Bedrock runtime client (connection-pooled)
pub struct BedrockClient {
    client: Client,
    api_key: String,
}

impl BedrockClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Build a client from `BEDROCK_API_KEY` (or `AWS_BEARER_TOKEN_BEDROCK`)
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("BEDROCK_API_KEY")
            .or_else(|_| env::var("AWS_BEARER_TOKEN_BEDROCK"))
            .ok()?;
        Self::new(api_key).ok()
    }

    fn converse_url(model: &ModelConfig) -> String {
        format!(
            "https://bedrock-runtime.{}.amazonaws.com/model/{}/converse",
            model.region, model.model_id
        )
    }

    async fn send_once(
        &self,
        url: &str,
        request: &ConverseRequest,
    ) -> std::result::Result<String, RequestFailure> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RequestFailure::Transient(format!("transport error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = format!("Bedrock returned {}: {}", status, body);
            // Rate limits and server faults are worth retrying
            return if status.as_u16() == 429 || status.is_server_error() {
                Err(RequestFailure::Transient(failure))
            } else {
                Err(RequestFailure::Fatal(failure))
            };
        }

        let reply: ConverseResponse = response
            .json()
            .await
            .map_err(|e| RequestFailure::Fatal(format!("invalid Bedrock response: {}", e)))?;

        reply
            .output
            .message
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| RequestFailure::Fatal("empty Bedrock response".to_string()))
    }
}

enum RequestFailure {
    Transient(String),
    Fatal(String),
}

#[async_trait]
impl InferenceClient for BedrockClient {
    async fn invoke(
        &self,
        model: &ModelConfig,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AdvisorError::RemoteService(
                "BEDROCK_API_KEY not configured".to_string(),
            ));
        }

        let url = Self::converse_url(model);
        let request = ConverseRequest {
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock {
                    text: user_prompt.to_string(),
                }],
            }],
            system: vec![SystemBlock {
                text: system_prompt.to_string(),
            }],
            inference_config: InferenceConfig {
                temperature: model.temperature,
                max_tokens: model.max_tokens,
            },
        };

        let mut last_failure = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            info!(model_id = %model.model_id, attempt, "Calling Bedrock converse API");

            match self.send_once(&url, &request).await {
                Ok(text) => return Ok(text),
                Err(RequestFailure::Fatal(reason)) => {
                    error!(reason = %reason, "Bedrock request failed");
                    return Err(AdvisorError::RemoteService(reason));
                }
                Err(RequestFailure::Transient(reason)) => {
                    warn!(reason = %reason, attempt, "Bedrock request failed, will retry");
                    last_failure = reason;
                    if attempt < MAX_ATTEMPTS {
                        let delay = RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        Err(AdvisorError::RemoteService(format!(
            "Bedrock request failed after {} attempts: {}",
            MAX_ATTEMPTS, last_failure
        )))
    }
}

/// Scripted client for development & testing
/// Keeps agents functional without the hosted service
pub struct MockInferenceClient {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockInferenceClient {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// User prompts seen so far, in call order
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock poisoned").clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn invoke(
        &self,
        _model: &ModelConfig,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt lock poisoned")
            .push(user_prompt.to_string());

        self.replies
            .lock()
            .expect("reply lock poisoned")
            .pop_front()
            .ok_or_else(|| {
                AdvisorError::RemoteService("mock client has no scripted reply left".to_string())
            })
    }
}

//
// ================= Wire Types =================
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConverseRequest {
    messages: Vec<Message>,
    system: Vec<SystemBlock>,
    inference_config: InferenceConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Serialize)]
struct SystemBlock {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InferenceConfig {
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ConverseResponse {
    output: ConverseOutput,
    #[allow(dead_code)]
    #[serde(rename = "stopReason")]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConverseOutput {
    message: Message,
}
