//! Interactive chat loop.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::{BurnerError, Result};
use crate::format;
use crate::session::{AppState, ChatSession};

const HELP: &str = "\
Type a message to send it. Commands:
  /name NAME                 save this conversation under NAME
  /unname                    stop saving this conversation
  /load NAME                 switch to a saved conversation
  /clear                     empty the conversation (deletes it if named)
  /prompt NAME               use a saved system prompt
  /prompts                   list system prompts
  /chats                     list saved conversations
  /new-prompt NAME :: TEXT   save a system prompt
  /render PATH               write the conversation as HTML
  /help                      show this help
  /quit                      leave";

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Say(String),
    Name(String),
    Unname,
    Load(String),
    Clear,
    Prompt(String),
    Prompts,
    Chats,
    NewPrompt { name: String, content: String },
    Render(PathBuf),
    Help,
    Quit,
    Empty,
}

impl ReplCommand {
    /// Parse a line. Lines not starting with `/` are messages.
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(Self::Say(trimmed.to_string()));
        };

        let (command, arg) = match rest.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (rest, ""),
        };

        let required = |usage: &str| -> Result<String> {
            if arg.is_empty() {
                Err(BurnerError::InvalidArgument(format!("usage: {usage}")))
            } else {
                Ok(arg.to_string())
            }
        };

        Ok(match command {
            "name" => Self::Name(required("/name NAME")?),
            "unname" => Self::Unname,
            "load" => Self::Load(required("/load NAME")?),
            "clear" => Self::Clear,
            "prompt" => Self::Prompt(required("/prompt NAME")?),
            "prompts" => Self::Prompts,
            "chats" => Self::Chats,
            "new-prompt" => {
                let usage = "/new-prompt NAME :: CONTENT";
                let (name, content) = arg
                    .split_once("::")
                    .ok_or_else(|| BurnerError::InvalidArgument(format!("usage: {usage}")))?;
                Self::NewPrompt {
                    name: name.trim().to_string(),
                    content: content.trim().to_string(),
                }
            }
            "render" => Self::Render(PathBuf::from(required("/render PATH")?)),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(BurnerError::InvalidArgument(format!(
                    "unknown command /{other} (try /help)"
                )))
            }
        })
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Read lines from `input` until EOF or `/quit`, writing replies to `out`.
///
/// Errors from individual lines are printed with their recovery hint and the
/// loop keeps going. Failing to read `input` or write `out` ends it.
pub async fn run<R, W>(
    session: &mut ChatSession,
    state: &mut AppState,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "Chatting via {} with prompt '{}'. /help for commands.",
        session.provider().name(),
        state.selected_prompt
    )?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match ReplCommand::parse(&line) {
            Ok(command) => execute(session, state, command, out).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => report(out, &err)?,
        }
        out.flush()?;
    }
    Ok(())
}

async fn execute<W: Write>(
    session: &mut ChatSession,
    state: &mut AppState,
    command: ReplCommand,
    out: &mut W,
) -> Result<Flow> {
    debug!(?command, "repl command");
    match command {
        ReplCommand::Empty => {}
        ReplCommand::Say(text) => {
            let turn = session.submit(state, &text).await?;
            writeln!(out, "{}", turn.reply.content)?;
            if let Some(err) = &turn.save_error {
                report(out, err)?;
            }
        }
        ReplCommand::Name(name) => {
            session.name_conversation(state, &name)?;
            writeln!(out, "Saved as '{name}'")?;
        }
        ReplCommand::Unname => {
            session.name_conversation(state, "")?;
            writeln!(out, "Conversation is no longer saved")?;
        }
        ReplCommand::Load(name) => {
            session.load_conversation(state, &name)?;
            writeln!(out, "Loaded '{name}' ({} messages)", state.messages.len())?;
            for message in &state.messages {
                writeln!(out, "{}: {}", message.role, message.content)?;
            }
        }
        ReplCommand::Clear => {
            session.clear_conversation(state)?;
            writeln!(out, "Conversation cleared")?;
        }
        ReplCommand::Prompt(name) => {
            session.select_prompt(state, &name)?;
            writeln!(out, "Using prompt '{name}'")?;
        }
        ReplCommand::Prompts => {
            for name in session.prompts().list_names() {
                let marker = if name == state.selected_prompt { "*" } else { " " };
                writeln!(out, "{marker} {name}")?;
            }
        }
        ReplCommand::Chats => {
            for name in session.chats().list_names() {
                let marker = if state.chat_name.as_deref() == Some(name) { "*" } else { " " };
                writeln!(out, "{marker} {name}")?;
            }
        }
        ReplCommand::NewPrompt { name, content } => {
            session.create_prompt(&name, &content)?;
            writeln!(out, "Saved prompt '{name}'")?;
        }
        ReplCommand::Render(path) => {
            let title = state.chat_name.as_deref().unwrap_or("Conversation");
            let page = format::render_page(title, &state.messages, &format::timestamp_now());
            fs::write(&path, page)?;
            writeln!(out, "Wrote {}", path.display())?;
        }
        ReplCommand::Help => writeln!(out, "{HELP}")?,
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn report<W: Write>(out: &mut W, err: &BurnerError) -> Result<()> {
    writeln!(out, "Error: {err}")?;
    writeln!(out, "Hint: {}", err.recovery_suggestion())?;
    Ok(())
}
