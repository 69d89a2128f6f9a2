//! Client for an OpenAI-compatible chat-completions endpoint.
//!
//! The tailoring stage makes exactly one call per run; failures are reported
//! and not retried.

use super::TailorError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "o1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const SYSTEM_PROMPT: &str = "You are a helpful resume tailoring assistant.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Reasoning models reject system messages and only accept temperature 1.
pub fn is_reasoning_model(model: &str) -> bool {
    model.trim().to_lowercase().starts_with("o1")
}

fn build_request<'a>(model: &'a str, prompt: &'a str) -> ChatRequest<'a> {
    let user = ChatMessage {
        role: "user",
        content: prompt,
    };
    if is_reasoning_model(model) {
        ChatRequest {
            model,
            messages: vec![user],
            temperature: 1.0,
        }
    } else {
        ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                user,
            ],
            temperature: 0.7,
        }
    }
}

/// Chat-completions client.
pub struct ChatClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, TailorError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send the prompt and return the trimmed reply.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, TailorError> {
        let request = build_request(model, prompt);
        log::debug!("calling {} with model {}", self.endpoint(), model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(TailorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatResponse = response.json().await?;
        extract_content(reply)
    }
}

fn extract_content(reply: ChatResponse) -> Result<String, TailorError> {
    let content = reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(TailorError::EmptyContent);
    }
    Ok(content)
}
