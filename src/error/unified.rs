//! Error classification and recovery hints.

use std::fmt;

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Storage,
    Input,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    TryAgainLater,
    CheckCredentials,
    CheckConfiguration,
    IncreaseTimeout,
    InspectStoreFile,
    FixInput,
    ContactSupport,
}

impl fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hint = match self {
            Self::TryAgainLater => "resend the message in a moment",
            Self::CheckCredentials => "check ANTHROPIC_API_KEY or ~/.anthropic",
            Self::CheckConfiguration => "check the BURNER_* environment variables",
            Self::IncreaseTimeout => "raise BURNER_TIMEOUT_SECS",
            Self::InspectStoreFile => "inspect or restore the JSON file in the data directory",
            Self::FixInput => "check the name or text you entered",
            Self::ContactSupport => "see the provider response above",
        };
        f.write_str(hint)
    }
}
