//! Generation settings.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Default output budget per reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Settings controlling text generation.
///
/// ```
/// use burner::types::GenerationSettings;
///
/// let settings = GenerationSettings::builder().max_tokens(2048).build();
/// assert_eq!(settings.max_tokens, 2048);
/// assert!(settings.temperature.is_none());
/// ```
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct GenerationSettings {
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
