//! Anthropic Messages API provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::DEFAULT_TIMEOUT;
use crate::error::{BurnerError, Result};
use crate::models::AnthropicModel;
use crate::types::{ChatMessage, GenerationSettings};
use crate::util::with_timeout;

use super::http::{anthropic_headers, shared_client, status_to_error};
use super::{request_messages, ChatProvider};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    model: AnthropicModel,
    api_key: String,
    base_url: String,
    settings: GenerationSettings,
    timeout: Duration,
}

impl AnthropicProvider {
    pub fn new(model: AnthropicModel, api_key: String, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
            settings: GenerationSettings::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &AnthropicModel {
        &self.model
    }

    fn build_request_body(&self, messages: &[ChatMessage], system_prompt: &str) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request_messages(messages)
            .into_iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_ref(),
                    "content": msg.content,
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.model.as_str(),
            "max_tokens": self.settings.max_tokens,
            "messages": messages,
        });

        if let Some(obj) = body.as_object_mut() {
            if !system_prompt.is_empty() {
                obj.insert("system".into(), system_prompt.into());
            }
            if let Some(temp) = self.settings.temperature {
                obj.insert("temperature".into(), temp.into());
            }
        }

        body
    }

    async fn send(&self, body: &serde_json::Value) -> Result<String> {
        let url = format!("{}/messages", self.base_url);

        let resp = shared_client()
            .post(&url)
            .headers(anthropic_headers(&self.api_key, API_VERSION))
            .json(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let headers = resp.headers().clone();
            let body_text = resp.text().await.unwrap_or_default();
            warn!(status, "Anthropic request failed");
            return Err(status_to_error(status, &headers, &body_text));
        }

        let data: AnthropicResponse = resp.json().await?;
        let text: String = data
            .content
            .iter()
            .filter(|block| block.r#type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(BurnerError::api(
                status,
                format!(
                    "response contained no text (stop_reason: {})",
                    data.stop_reason.as_deref().unwrap_or("unknown")
                ),
            ));
        }

        debug!(
            input_tokens = data.usage.input_tokens,
            output_tokens = data.usage.output_tokens,
            "Anthropic reply received"
        );
        Ok(text)
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, messages: &[ChatMessage], system_prompt: &str) -> Result<String> {
        let body = self.build_request_body(messages, system_prompt);
        debug!(model = self.model.as_str(), messages = messages.len(), "Anthropic complete");
        with_timeout(self.timeout, self.send(&body)).await
    }
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}
