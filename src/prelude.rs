//! Convenience re-exports for common use.

pub use crate::config::BurnerConfig;
pub use crate::error::{BurnerError, Result};
pub use crate::models::ProviderKind;
pub use crate::provider::{create_provider, ChatProvider};
pub use crate::session::{AppState, ChatSession, Turn};
pub use crate::store::{ChatStore, PromptStore};
pub use crate::types::{ChatMessage, Conversation, GenerationSettings, Role};
