//! Burner: a small chat client for Anthropic models.
//!
//! Conversations are rendered as escaped HTML bubbles, system prompts and
//! named chats persist as JSON files, and the model call sits behind the
//! [`provider::ChatProvider`] trait so it can be swapped out in tests.
//!
//! # Quick Start
//!
//! ```no_run
//! use burner::prelude::*;
//!
//! # async fn example() -> burner::error::Result<()> {
//! let config = BurnerConfig::from_env()?;
//! let mut session = ChatSession::from_config(&config)?;
//! let mut state = session.initial_state();
//!
//! let turn = session.submit(&mut state, "Hello!").await?;
//! println!("{}", turn.reply.content);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod store;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
