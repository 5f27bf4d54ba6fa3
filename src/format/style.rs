/// Stylesheet for rendered pages.
pub const STYLESHEET: &str = r#"
body {
    background-color: #171717;
    color: #ffffff;
    font-family: system-ui, sans-serif;
    max-width: 60rem;
    margin: 0 auto;
    padding: 1rem;
}

.chat-container {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 0.5rem;
}

.user-message {
    background-color: #3B82F6;
    color: #ffffff;
    padding: 1rem;
    border-radius: 1rem;
    margin: 0.2rem 0;
    margin-left: 20%;
    max-width: 80%;
    white-space: pre-wrap;
    align-self: flex-end;
}

.assistant-message {
    background-color: #262626;
    color: #ffffff;
    padding: 1rem;
    border-radius: 1rem;
    margin: 0.2rem 0;
    margin-right: 20%;
    max-width: 80%;
    white-space: pre-wrap;
    align-self: flex-start;
}

pre {
    background-color: #363636;
    padding: 1rem;
    border-radius: 0.5rem;
    margin: 0.5rem 0;
    white-space: pre-wrap;
    overflow-x: auto;
}

code {
    color: #E0E0E0;
}

.message-timestamp {
    font-size: 0.8rem;
    color: rgba(255, 255, 255, 0.7);
    margin-top: 0.2rem;
    text-align: right;
}
"#;
