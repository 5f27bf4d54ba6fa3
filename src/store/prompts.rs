//! Named system prompts.

use std::path::PathBuf;

use tracing::info;

use super::{restore, Entries, JsonFile};
use crate::error::{BurnerError, Result};

/// Name of the built-in prompt used when no prompt file exists yet.
pub const DEFAULT_PROMPT_NAME: &str = "Default";
/// Content of the built-in prompt.
pub const DEFAULT_PROMPT_CONTENT: &str = "You are Claude, a helpful AI assistant.";

/// File name used inside the data directory.
pub const PROMPTS_FILE_NAME: &str = "system_prompts.json";

/// Named system prompts backed by a single JSON file.
///
/// # Example
/// ```no_run
/// use burner::store::PromptStore;
///
/// let mut prompts = PromptStore::load("system_prompts.json")?;
/// prompts.save("Pirate", "Answer like a pirate.")?;
/// assert_eq!(prompts.get("Pirate"), Some("Answer like a pirate."));
/// # Ok::<(), burner::error::BurnerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PromptStore {
    file: JsonFile<String>,
    prompts: Entries<String>,
}

impl PromptStore {
    /// Load prompts from `path`.
    ///
    /// A missing file yields the single built-in `Default` prompt; the file
    /// itself is only created by the first `save`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let file = JsonFile::new(path);
        let prompts = file.read()?.unwrap_or_else(default_prompts);
        Ok(Self { file, prompts })
    }

    /// Insert or overwrite a prompt, then rewrite the backing file.
    ///
    /// If the write fails the in-memory entry is restored.
    pub fn save(&mut self, name: impl Into<String>, content: impl Into<String>) -> Result<()> {
        let name = name.into();
        info!(prompt = %name, "saving system prompt");
        let previous = self.prompts.insert(name.clone(), content.into());
        if let Err(err) = self.file.write(&self.prompts) {
            restore(&mut self.prompts, name, previous);
            return Err(err);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.prompts.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prompts.contains_key(name)
    }

    /// Prompt names in mapping order.
    pub fn list_names(&self) -> Vec<&str> {
        self.prompts.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> &Entries<String> {
        &self.prompts
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

/// Check a user-supplied prompt and return its trimmed name.
///
/// Both the name and the content must contain non-whitespace text.
pub fn validate_prompt<'a>(name: &'a str, content: &str) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BurnerError::InvalidArgument("prompt name is empty".into()));
    }
    if content.trim().is_empty() {
        return Err(BurnerError::InvalidArgument("prompt content is empty".into()));
    }
    Ok(name)
}

fn default_prompts() -> Entries<String> {
    let mut prompts = Entries::new();
    prompts.insert(
        DEFAULT_PROMPT_NAME.to_string(),
        DEFAULT_PROMPT_CONTENT.to_string(),
    );
    prompts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, PromptStore) {
        let dir = TempDir::new().unwrap();
        let store = PromptStore::load(dir.path().join(PROMPTS_FILE_NAME)).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_yields_default_prompt() {
        let (_dir, store) = temp_store();
        assert_eq!(store.list_names(), vec![DEFAULT_PROMPT_NAME]);
        assert_eq!(store.get(DEFAULT_PROMPT_NAME), Some(DEFAULT_PROMPT_CONTENT));
    }

    #[test]
    fn missing_file_is_not_created_by_load() {
        let (dir, _store) = temp_store();
        assert!(!dir.path().join(PROMPTS_FILE_NAME).exists());
    }

    #[test]
    fn overwrite_keeps_position() {
        let (_dir, mut store) = temp_store();
        store.save("A", "x").unwrap();
        store.save(DEFAULT_PROMPT_NAME, "changed").unwrap();
        assert_eq!(store.list_names(), vec![DEFAULT_PROMPT_NAME, "A"]);
        assert_eq!(store.get(DEFAULT_PROMPT_NAME), Some("changed"));
    }

    #[test]
    fn get_absent_returns_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn validate_prompt_trims_name_and_rejects_blanks() {
        assert_eq!(validate_prompt("  Terse ", "Be brief.").unwrap(), "Terse");
        assert!(matches!(
            validate_prompt(" ", "content"),
            Err(BurnerError::InvalidArgument(_))
        ));
        assert!(matches!(
            validate_prompt("Name", "\n\t"),
            Err(BurnerError::InvalidArgument(_))
        ));
    }
}
