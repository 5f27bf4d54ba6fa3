//! Model and provider selection.

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicModel;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which backend answers chat turns.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    #[cfg(feature = "anthropic")]
    #[default]
    Anthropic,
    /// Offline provider that never leaves the machine.
    #[cfg_attr(not(feature = "anthropic"), default)]
    Echo,
}
