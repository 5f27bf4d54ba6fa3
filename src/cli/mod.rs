//! CLI entry point for Burner.

pub mod commands;
pub mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Burner chat CLI
#[derive(Parser, Debug)]
#[command(name = "burner", version, about = "Chat with Claude, keeping prompts and chats on disk")]
pub struct Cli {
    /// Directory holding system_prompts.json and saved_chats.json
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive conversation
    Chat(ChatArgs),
    /// Manage saved system prompts
    Prompts(PromptsArgs),
    /// Manage saved conversations
    Chats(ChatsArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// System prompt to start with
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Saved conversation to continue
    #[arg(short, long)]
    pub load: Option<String>,

    /// Use the offline echo provider instead of the API
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `prompts` subcommand group.
#[derive(Parser, Debug)]
pub struct PromptsArgs {
    #[command(subcommand)]
    pub command: PromptsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PromptsCommands {
    /// List prompt names
    List,
    /// Print one prompt
    Show { name: String },
    /// Add or replace a prompt
    Add { name: String, content: String },
}

/// Arguments for the `chats` subcommand group.
#[derive(Parser, Debug)]
pub struct ChatsArgs {
    #[command(subcommand)]
    pub command: ChatsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ChatsCommands {
    /// List saved conversation names
    List,
    /// Print a saved conversation
    Show { name: String },
    /// Delete a saved conversation
    Delete { name: String },
    /// Render a saved conversation as an HTML page
    Render {
        name: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
