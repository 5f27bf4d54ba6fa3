//! Conversation controller.
//!
//! Persistence lifecycle of one conversation:
//! `Unnamed --name--> Named (saved) --turn--> Named (re-saved) --clear--> Unnamed (removed)`.

mod state;

pub use state::AppState;

use tracing::{info, warn};

use crate::config::BurnerConfig;
use crate::error::{BurnerError, Result};
use crate::format;
use crate::provider::{create_provider, request_messages, ChatProvider};
use crate::store::{validate_prompt, ChatStore, PromptStore};
use crate::types::ChatMessage;

/// A completed turn.
#[derive(Debug)]
pub struct Turn<'s> {
    /// The assistant reply, now the last message of the conversation.
    pub reply: &'s ChatMessage,
    /// Set when the conversation is named and re-saving it failed.
    pub save_error: Option<BurnerError>,
}

/// Stores and provider shared by every handler.
pub struct ChatSession {
    prompts: PromptStore,
    chats: ChatStore,
    provider: Box<dyn ChatProvider>,
}

impl ChatSession {
    pub fn new(prompts: PromptStore, chats: ChatStore, provider: Box<dyn ChatProvider>) -> Self {
        Self {
            prompts,
            chats,
            provider,
        }
    }

    /// Load both stores from the configured data directory and build the
    /// configured provider.
    pub fn from_config(config: &BurnerConfig) -> Result<Self> {
        let prompts = PromptStore::load(config.prompts_path())?;
        let chats = ChatStore::load(config.chats_path())?;
        let provider = create_provider(config)?;
        info!(
            provider = provider.name(),
            data_dir = %config.data_dir().display(),
            "chat session ready"
        );
        Ok(Self::new(prompts, chats, provider))
    }

    pub fn prompts(&self) -> &PromptStore {
        &self.prompts
    }

    pub fn chats(&self) -> &ChatStore {
        &self.chats
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    /// Fresh state for this session's prompt store.
    pub fn initial_state(&self) -> AppState {
        AppState::new(&self.prompts)
    }

    /// Run one user turn.
    ///
    /// The user message is appended before the provider is called and stays
    /// in `state` if the call fails. `system` entries in the history are not
    /// sent. Once a reply has been appended, a failure to re-save a named
    /// conversation is reported in [`Turn::save_error`] rather than as an
    /// error, so the caller can still show the reply.
    pub async fn submit<'s>(&mut self, state: &'s mut AppState, text: &str) -> Result<Turn<'s>> {
        if text.trim().is_empty() {
            return Err(BurnerError::InvalidArgument("message is empty".into()));
        }

        state.messages.push(ChatMessage::user(text));

        let system_prompt = match self.prompts.get(&state.selected_prompt) {
            Some(prompt) => prompt,
            None => {
                warn!(prompt = %state.selected_prompt, "selected prompt missing, sending none");
                ""
            }
        };

        let outgoing: Vec<ChatMessage> = request_messages(&state.messages)
            .into_iter()
            .cloned()
            .collect();

        let reply = self
            .provider
            .complete(&outgoing, system_prompt)
            .await
            .map_err(|err| {
                warn!(provider = self.provider.name(), error = %err, "turn failed");
                BurnerError::TurnFailed(Box::new(err))
            })?;

        let reply_index = state.messages.len();
        state.messages.push(ChatMessage::assistant(reply));

        let save_error = match &state.chat_name {
            Some(name) => self.chats.save(name.as_str(), &state.messages).err(),
            None => None,
        };
        if let Some(err) = &save_error {
            warn!(chat = ?state.chat_name, error = %err, "reply received but chat not saved");
        }

        Ok(Turn {
            reply: &state.messages[reply_index],
            save_error,
        })
    }

    /// Assign, change or drop the conversation name.
    ///
    /// A blank name makes the conversation unnamed without deleting anything.
    /// A new name saves the full message list under it.
    pub fn name_conversation(&mut self, state: &mut AppState, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            if let Some(previous) = state.chat_name.take() {
                info!(chat = %previous, "conversation unnamed");
            }
            return Ok(());
        }
        if state.chat_name.as_deref() == Some(name) {
            return Ok(());
        }

        self.chats.save(name, &state.messages)?;
        state.chat_name = Some(name.to_string());
        Ok(())
    }

    /// Replace the conversation with a saved one.
    pub fn load_conversation(&mut self, state: &mut AppState, name: &str) -> Result<()> {
        let messages = self
            .chats
            .get(name)
            .ok_or_else(|| BurnerError::ChatNotFound(name.to_string()))?;
        state.messages = messages.to_vec();
        state.chat_name = Some(name.to_string());
        info!(chat = %name, messages = state.messages.len(), "conversation loaded");
        Ok(())
    }

    /// Empty the conversation, deleting its saved copy if it was named.
    pub fn clear_conversation(&mut self, state: &mut AppState) -> Result<()> {
        if let Some(name) = state.chat_name.take() {
            self.chats.delete(&name)?;
        }
        state.messages.clear();
        Ok(())
    }

    pub fn select_prompt(&mut self, state: &mut AppState, name: &str) -> Result<()> {
        if !self.prompts.contains(name) {
            return Err(BurnerError::PromptNotFound(name.to_string()));
        }
        state.selected_prompt = name.to_string();
        Ok(())
    }

    /// Save a new (or replacement) system prompt.
    pub fn create_prompt(&mut self, name: &str, content: &str) -> Result<()> {
        let name = validate_prompt(name, content)?;
        self.prompts.save(name, content)
    }

    /// Render the current conversation as HTML.
    pub fn render(&self, state: &AppState, timestamp: &str) -> String {
        format::render_messages(&state.messages, timestamp)
    }
}
