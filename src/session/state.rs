//! Per-conversation application state.

use crate::store::{PromptStore, DEFAULT_PROMPT_NAME};
use crate::types::{ChatMessage, Conversation};

/// Everything that changes while chatting.
///
/// Handlers on [`super::ChatSession`] take this by `&mut` so every
/// transition is visible at the call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub messages: Conversation,
    pub chat_name: Option<String>,
    pub selected_prompt: String,
}

impl AppState {
    /// Empty, unnamed conversation using the first stored prompt.
    pub fn new(prompts: &PromptStore) -> Self {
        let selected_prompt = prompts
            .list_names()
            .first()
            .copied()
            .unwrap_or(DEFAULT_PROMPT_NAME)
            .to_string();
        Self {
            messages: Vec::new(),
            chat_name: None,
            selected_prompt,
        }
    }

    pub fn is_named(&self) -> bool {
        self.chat_name.is_some()
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
