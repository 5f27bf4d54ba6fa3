//! JSON-file backed key-value stores.
//!
//! Each store keeps an insertion-ordered `name -> value` map in memory,
//! populated once at load time, and rewrites the whole backing file after
//! every mutation.

pub mod chats;
pub mod prompts;

pub use chats::ChatStore;
pub use prompts::{validate_prompt, PromptStore, DEFAULT_PROMPT_CONTENT, DEFAULT_PROMPT_NAME};

use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{BurnerError, Result};

/// Ordered mapping persisted by a store.
pub type Entries<V> = IndexMap<String, V>;

/// A single JSON document holding an `Entries<V>` map.
#[derive(Debug, Clone)]
pub struct JsonFile<V> {
    path: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V> JsonFile<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    ///
    /// Returns `None` if the file does not exist. Malformed content is an
    /// error; nothing is repaired.
    pub fn read(&self) -> Result<Option<Entries<V>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file missing");
                return Ok(None);
            }
            Err(err) => return Err(BurnerError::Io(err)),
        };

        let entries: Entries<V> =
            serde_json::from_str(&raw).map_err(|source| BurnerError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), entries = entries.len(), "store file loaded");
        Ok(Some(entries))
    }

    /// Replace the whole file with `entries`.
    pub fn write(&self, entries: &Entries<V>) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(entries)?;
        atomic_write(&self.path, &serialized)?;
        debug!(path = %self.path.display(), entries = entries.len(), "store file written");
        Ok(())
    }
}

/// Undo an `insert` of `key` whose previous value was `previous`.
///
/// An overwritten key keeps its position, so putting the old value back is
/// enough; a fresh key was appended last and is popped.
fn restore<V>(entries: &mut Entries<V>, key: String, previous: Option<V>) {
    match previous {
        Some(value) => {
            entries.insert(key, value);
        }
        None => {
            entries.shift_remove(&key);
        }
    }
}

/// Write `data` to a sibling temp file and rename it over `path`.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path.file_name().ok_or_else(|| {
        BurnerError::Configuration(format!("Store path {} has no file name", path.display()))
    })?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_name = format!(
        ".{}.tmp-{}-{nonce}",
        file_name.to_string_lossy(),
        std::process::id()
    );
    let temp_path = path.with_file_name(temp_name);

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.write_all(b"\n")?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(BurnerError::Io(err));
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(BurnerError::Io(err));
    }

    Ok(())
}
