//! Named conversations.

use std::path::PathBuf;

use tracing::{debug, info};

use super::{restore, Entries, JsonFile};
use crate::error::Result;
use crate::types::{ChatMessage, Conversation};

/// File name used inside the data directory.
pub const CHATS_FILE_NAME: &str = "saved_chats.json";

/// Named conversations backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct ChatStore {
    file: JsonFile<Conversation>,
    chats: Entries<Conversation>,
}

impl ChatStore {
    /// Load conversations from `path`; a missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let file = JsonFile::new(path);
        let chats = file.read()?.unwrap_or_default();
        Ok(Self { file, chats })
    }

    /// Insert or overwrite a conversation, then rewrite the backing file.
    ///
    /// If the write fails the in-memory entry is restored.
    pub fn save(&mut self, name: impl Into<String>, messages: &[ChatMessage]) -> Result<()> {
        let name = name.into();
        info!(chat = %name, messages = messages.len(), "saving chat");
        let previous = self.chats.insert(name.clone(), messages.to_vec());
        if let Err(err) = self.file.write(&self.chats) {
            restore(&mut self.chats, name, previous);
            return Err(err);
        }
        Ok(())
    }

    /// Remove a conversation. Unknown names are ignored.
    ///
    /// If the write fails the entry is put back at its old position.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let Some((index, key, messages)) = self.chats.shift_remove_full(name) else {
            debug!(chat = %name, "delete of unknown chat ignored");
            return Ok(());
        };
        if let Err(err) = self.file.write(&self.chats) {
            self.chats.shift_insert(index, key, messages);
            return Err(err);
        }
        info!(chat = %name, "deleted chat");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[ChatMessage]> {
        self.chats.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chats.contains_key(name)
    }

    /// Conversation names in mapping order.
    pub fn list_names(&self) -> Vec<&str> {
        self.chats.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> &Entries<Conversation> {
        &self.chats
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}
