//! Configuration system (layered: code > env > `.env` > key file).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{BurnerError, Result};
use crate::models::ProviderKind;
use crate::store::chats::CHATS_FILE_NAME;
use crate::store::prompts::PROMPTS_FILE_NAME;
use crate::types::GenerationSettings;

/// Model used when `BURNER_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
/// Provider request deadline when `BURNER_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
/// Key file read when no API key is set in the environment.
pub const KEY_FILE_NAME: &str = ".anthropic";

/// Settings for a Burner session.
///
/// Resolution order for the API key:
/// 1. Explicit `set_api_key`
/// 2. `ANTHROPIC_API_KEY` (process env, then `.env`)
/// 3. First line of `~/.anthropic`
#[derive(Clone)]
pub struct BurnerConfig {
    provider: ProviderKind,
    api_key: Option<String>,
    base_url: Option<String>,
    model: String,
    settings: GenerationSettings,
    timeout: Duration,
    data_dir: PathBuf,
}

impl fmt::Debug for BurnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurnerConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("settings", &self.settings)
            .field("timeout", &self.timeout)
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl Default for BurnerConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl BurnerConfig {
    /// Config with defaults and no credentials, storing files in `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            settings: GenerationSettings::default(),
            timeout: DEFAULT_TIMEOUT,
            data_dir: data_dir.into(),
        }
    }

    /// Load from the process environment, a `.env` file and `~/.anthropic`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let home = directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self::from_lookup(|key| std::env::var(key).ok(), home.as_deref())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, home_dir: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = var("BURNER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let mut config = Self::new(data_dir);

        if let Some(provider) = var("BURNER_PROVIDER") {
            config.provider = provider.parse().map_err(|_| {
                BurnerError::Configuration(format!("Unknown BURNER_PROVIDER '{provider}'"))
            })?;
        }
        if let Some(model) = var("BURNER_MODEL") {
            config.model = model;
        }
        if let Some(url) = var("ANTHROPIC_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Some(raw) = var("BURNER_MAX_TOKENS") {
            config.settings.max_tokens = parse_var("BURNER_MAX_TOKENS", &raw)?;
        }
        if let Some(raw) = var("BURNER_TEMPERATURE") {
            config.settings.temperature = Some(parse_var("BURNER_TEMPERATURE", &raw)?);
        }
        if let Some(raw) = var("BURNER_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_var("BURNER_TIMEOUT_SECS", &raw)?);
        }

        config.api_key = match var("ANTHROPIC_API_KEY") {
            Some(key) => Some(key.trim().to_string()),
            None => home_dir.and_then(read_key_file),
        };

        Ok(config)
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn set_provider(&mut self, provider: ProviderKind) {
        self.provider = provider;
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into());
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = Some(url.into());
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GenerationSettings) {
        self.settings = settings;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn set_data_dir(&mut self, dir: impl Into<PathBuf>) {
        self.data_dir = dir.into();
    }

    /// Path of the prompt store file.
    pub fn prompts_path(&self) -> PathBuf {
        self.data_dir.join(PROMPTS_FILE_NAME)
    }

    /// Path of the chat store file.
    pub fn chats_path(&self) -> PathBuf {
        self.data_dir.join(CHATS_FILE_NAME)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| BurnerError::Configuration(format!("Invalid {name} value '{raw}'")))
}

fn read_key_file(home_dir: &Path) -> Option<String> {
    let path = home_dir.join(KEY_FILE_NAME);
    let raw = std::fs::read_to_string(&path).ok()?;
    let key = raw.lines().next()?.trim();
    if key.is_empty() {
        return None;
    }
    debug!(path = %path.display(), "using API key from key file");
    Some(key.to_string())
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "burner")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".burner"))
}
