//! HTML rendering of chat bubbles.
//!
//! Message content is always escaped here; the surrounding template is the
//! only literal markup in the output.

mod style;

pub use style::STYLESHEET;

use std::borrow::Cow;

use crate::types::{ChatMessage, Role};

/// CSS class for user bubbles.
pub const USER_CLASS: &str = "user-message";
/// CSS class for every other bubble.
pub const ASSISTANT_CLASS: &str = "assistant-message";

/// Escape the five HTML-significant characters.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input
        .chars()
        .any(|ch| matches!(ch, '&' | '<' | '>' | '"' | '\''))
    {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(ch),
        }
    }
    Cow::Owned(output)
}

/// CSS class for a role.
pub fn css_class(role: Role) -> &'static str {
    match role {
        Role::User => USER_CLASS,
        _ => ASSISTANT_CLASS,
    }
}

/// Format a single message bubble.
///
/// `timestamp` is inserted as given.
pub fn format_message(content: &str, role: Role, timestamp: &str) -> String {
    format!(
        "<div class=\"{class}\">\n    {content}\n    <div class=\"message-timestamp\">{timestamp}</div>\n</div>\n",
        class = css_class(role),
        content = escape_html(content),
    )
}

/// Render every message inside a `chat-container` block, all stamped with
/// the same render time.
pub fn render_messages(messages: &[ChatMessage], timestamp: &str) -> String {
    let mut output = String::from("<div class=\"chat-container\">\n");
    for message in messages {
        output.push_str(&format_message(&message.content, message.role, timestamp));
    }
    output.push_str("</div>\n");
    output
}

/// Render a standalone HTML document for a conversation.
pub fn render_page(title: &str, messages: &[ChatMessage], timestamp: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        body = render_messages(messages, timestamp),
    )
}

/// Current local time as `HH:MM`.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
