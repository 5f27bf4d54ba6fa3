//! Offline provider that answers without calling any API.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::types::{ChatMessage, Role};

use super::{request_messages, ChatProvider};

/// Replies by quoting the last user message.
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, messages: &[ChatMessage], system_prompt: &str) -> Result<String> {
        let sent = request_messages(messages);
        debug!(
            messages = sent.len(),
            system_prompt_len = system_prompt.len(),
            "echo provider called"
        );
        let last_user = sent
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .unwrap_or("");
        Ok(format!("[echo] {last_user}"))
    }
}
