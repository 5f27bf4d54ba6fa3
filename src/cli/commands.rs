//! Handlers for the `chat`, `prompts` and `chats` subcommands.

use std::fs;
use std::io::Write;

use tracing::info;

use super::repl;
use super::{ChatArgs, ChatsCommands, PromptsCommands};
use crate::config::BurnerConfig;
use crate::error::{BurnerError, Result};
use crate::format;
use crate::session::ChatSession;
use crate::store::{validate_prompt, ChatStore, PromptStore};

/// Handle `burner chat`.
pub async fn handle_chat(config: &BurnerConfig, args: ChatArgs) -> Result<()> {
    let mut session = ChatSession::from_config(config)?;
    let mut state = session.initial_state();

    if let Some(prompt) = args.prompt.as_deref() {
        session.select_prompt(&mut state, prompt)?;
    }
    if let Some(chat) = args.load.as_deref() {
        session.load_conversation(&mut state, chat)?;
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(&mut session, &mut state, stdin, &mut stdout).await
}

/// Handle `burner prompts ...`.
pub fn handle_prompts(
    config: &BurnerConfig,
    command: PromptsCommands,
    out: &mut impl Write,
) -> Result<()> {
    let mut prompts = PromptStore::load(config.prompts_path())?;

    match command {
        PromptsCommands::List => {
            for name in prompts.list_names() {
                writeln!(out, "{name}")?;
            }
        }
        PromptsCommands::Show { name } => {
            let content = prompts
                .get(&name)
                .ok_or_else(|| BurnerError::PromptNotFound(name.clone()))?;
            writeln!(out, "{content}")?;
        }
        PromptsCommands::Add { name, content } => {
            let name = validate_prompt(&name, &content)?;
            prompts.save(name, content.as_str())?;
            writeln!(out, "Saved prompt '{name}'")?;
        }
    }
    Ok(())
}

/// Handle `burner chats ...`.
pub fn handle_chats(config: &BurnerConfig, command: ChatsCommands, out: &mut impl Write) -> Result<()> {
    let mut chats = ChatStore::load(config.chats_path())?;

    match command {
        ChatsCommands::List => {
            for name in chats.list_names() {
                let count = chats.get(name).map_or(0, <[_]>::len);
                writeln!(out, "{name} ({count} messages)")?;
            }
        }
        ChatsCommands::Show { name } => {
            let messages = chats
                .get(&name)
                .ok_or_else(|| BurnerError::ChatNotFound(name.clone()))?;
            for message in messages {
                writeln!(out, "{}: {}", message.role, message.content)?;
            }
        }
        ChatsCommands::Delete { name } => {
            if !chats.contains(&name) {
                writeln!(out, "No saved chat named '{name}', nothing deleted")?;
                return Ok(());
            }
            chats.delete(&name)?;
            writeln!(out, "Deleted chat '{name}'")?;
        }
        ChatsCommands::Render { name, output } => {
            let messages = chats
                .get(&name)
                .ok_or_else(|| BurnerError::ChatNotFound(name.clone()))?;
            let page = format::render_page(&name, messages, &format::timestamp_now());
            match output {
                Some(path) => {
                    fs::write(&path, page)?;
                    info!(chat = %name, path = %path.display(), "chat rendered");
                    writeln!(out, "Wrote {}", path.display())?;
                }
                None => write!(out, "{page}")?,
            }
        }
    }
    Ok(())
}
