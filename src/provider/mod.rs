//! Chat provider trait and implementations.

pub mod echo;
pub mod http;

#[cfg(feature = "anthropic")]
pub mod anthropic;

use async_trait::async_trait;

use crate::config::BurnerConfig;
use crate::error::{BurnerError, Result};
use crate::models::ProviderKind;
use crate::types::{ChatMessage, Role};

/// The LLM call, as a capability.
///
/// One `complete` call sends the whole conversation plus the system prompt
/// and yields exactly one assistant reply.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Ask for the next assistant reply.
    async fn complete(&self, messages: &[ChatMessage], system_prompt: &str) -> Result<String>;
}

/// Messages that may be sent to a provider: `system` entries are dropped.
pub fn request_messages(messages: &[ChatMessage]) -> Vec<&ChatMessage> {
    messages
        .iter()
        .filter(|message| message.role != Role::System)
        .collect()
}

/// Create the provider selected by `config`.
pub fn create_provider(config: &BurnerConfig) -> Result<Box<dyn ChatProvider>> {
    match config.provider() {
        #[cfg(feature = "anthropic")]
        ProviderKind::Anthropic => {
            let api_key = config.api_key().ok_or_else(|| {
                BurnerError::Authentication(
                    "Missing ANTHROPIC_API_KEY (or ~/.anthropic key file)".into(),
                )
            })?;
            let model = config
                .model()
                .parse()
                .unwrap_or_else(|_| crate::models::AnthropicModel::Custom(config.model().into()));
            Ok(Box::new(
                anthropic::AnthropicProvider::new(
                    model,
                    api_key.to_string(),
                    config.base_url().map(str::to_string),
                )
                .with_settings(config.settings().clone())
                .with_timeout(config.timeout()),
            ))
        }
        ProviderKind::Echo => Ok(Box::new(echo::EchoProvider::new())),
    }
}
