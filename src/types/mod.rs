//! Core types for Burner.

pub mod generation;
pub mod message;

pub use generation::*;
pub use message::*;
