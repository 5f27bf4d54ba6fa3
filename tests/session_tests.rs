//! Tests for conversation handlers using the mock provider.

mod common;

use common::{session_in, temp_session, MockProvider};
use pretty_assertions::assert_eq;

use burner::error::{BurnerError, ErrorCategory};
use burner::store::{ChatStore, DEFAULT_PROMPT_CONTENT, DEFAULT_PROMPT_NAME};
use burner::types::{ChatMessage, Role};

#[tokio::test]
async fn submit_appends_user_and_assistant_messages() {
    let provider = MockProvider::new();
    provider.queue_reply("Hello there!");
    let (_dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();

    let turn = session.submit(&mut state, "hi").await.unwrap();
    assert_eq!(turn.reply, &ChatMessage::assistant("Hello there!"));
    assert!(turn.save_error.is_none());

    assert_eq!(
        state.messages,
        vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("Hello there!")
        ]
    );
}

#[tokio::test]
async fn submit_sends_full_history_and_selected_prompt() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();

    session.submit(&mut state, "one").await.unwrap();
    session.submit(&mut state, "two").await.unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    let last = provider.last_request().unwrap();
    assert_eq!(last.system_prompt, DEFAULT_PROMPT_CONTENT);
    assert_eq!(last.messages.len(), 3);
    assert_eq!(last.messages[2], ChatMessage::user("two"));
}

#[tokio::test]
async fn system_messages_in_loaded_chats_are_not_sent() {
    let provider = MockProvider::new();
    let (dir, _) = temp_session(provider.clone());
    let mut chats = ChatStore::load(dir.path().join("saved_chats.json")).unwrap();
    chats
        .save(
            "legacy",
            &[ChatMessage::system("stale"), ChatMessage::user("earlier")],
        )
        .unwrap();

    let mut session = session_in(&dir, provider.clone());
    let mut state = session.initial_state();
    session.load_conversation(&mut state, "legacy").unwrap();
    session.submit(&mut state, "now").await.unwrap();

    let sent = provider.last_request().unwrap().messages;
    let roles: Vec<Role> = sent.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::User]);

    // the loaded history itself is left intact
    assert_eq!(state.messages[0], ChatMessage::system("stale"));
}

#[tokio::test]
async fn reply_is_returned_when_named_chat_cannot_be_saved() {
    let provider = MockProvider::new();
    provider.queue_reply("still here");
    let (dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.name_conversation(&mut state, "doomed").unwrap();

    let chats_file = dir.path().join("saved_chats.json");
    std::fs::remove_file(&chats_file).unwrap();
    std::fs::create_dir(&chats_file).unwrap();

    let turn = session.submit(&mut state, "hello").await.unwrap();
    assert_eq!(turn.reply, &ChatMessage::assistant("still here"));
    let save_error = turn.save_error.expect("save should have failed");
    assert_eq!(save_error.category(), ErrorCategory::Storage);

    assert_eq!(
        state.messages,
        vec![ChatMessage::user("hello"), ChatMessage::assistant("still here")]
    );
}

#[tokio::test]
async fn failed_turn_keeps_user_message() {
    let provider = MockProvider::new();
    provider.queue_failure(|| BurnerError::api(529, "overloaded"));
    let (_dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();

    let err = session.submit(&mut state, "are you there?").await.unwrap_err();
    assert!(matches!(err, BurnerError::TurnFailed(_)));
    assert_eq!(err.category(), ErrorCategory::Server);
    assert_eq!(state.messages, vec![ChatMessage::user("are you there?")]);
}

#[tokio::test]
async fn failed_turn_is_not_persisted_as_a_reply() {
    let provider = MockProvider::new();
    provider.queue_failure(|| BurnerError::Timeout(1000));
    let (dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();
    session.name_conversation(&mut state, "named").unwrap();

    let err = session.submit(&mut state, "slow?").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Timeout);

    let chats = ChatStore::load(dir.path().join("saved_chats.json")).unwrap();
    let empty: &[ChatMessage] = &[];
    assert_eq!(chats.get("named"), Some(empty));
}

#[tokio::test]
async fn blank_input_is_rejected_without_calling_provider() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();

    let err = session.submit(&mut state, "   ").await.unwrap_err();
    assert!(matches!(err, BurnerError::InvalidArgument(_)));
    assert!(state.messages.is_empty());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn naming_persists_current_messages() {
    let provider = MockProvider::new();
    provider.queue_reply("first reply");
    let (dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "first").await.unwrap();

    session.name_conversation(&mut state, "  Trip plans ").unwrap();
    assert_eq!(state.chat_name.as_deref(), Some("Trip plans"));

    let chats = ChatStore::load(dir.path().join("saved_chats.json")).unwrap();
    assert_eq!(chats.get("Trip plans"), Some(state.messages.as_slice()));
}

#[tokio::test]
async fn unnamed_conversations_are_never_saved() {
    let provider = MockProvider::new();
    let (dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "hello").await.unwrap();

    assert!(!dir.path().join("saved_chats.json").exists());
    assert!(session.chats().list_names().is_empty());
}

#[tokio::test]
async fn named_conversation_is_resaved_after_each_turn() {
    let provider = MockProvider::new();
    provider.queue_reply("a1");
    provider.queue_reply("a2");
    let (dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();

    session.name_conversation(&mut state, "ongoing").unwrap();
    session.submit(&mut state, "q1").await.unwrap();
    session.submit(&mut state, "q2").await.unwrap();

    let chats = ChatStore::load(dir.path().join("saved_chats.json")).unwrap();
    assert_eq!(chats.get("ongoing").map(<[ChatMessage]>::len), Some(4));
}

#[tokio::test]
async fn blank_name_unnames_without_deleting() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "hello").await.unwrap();
    session.name_conversation(&mut state, "keep").unwrap();

    session.name_conversation(&mut state, "").unwrap();
    assert!(!state.is_named());
    assert!(session.chats().contains("keep"));
}

#[tokio::test]
async fn renaming_saves_under_new_name_and_keeps_old_entry() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "hello").await.unwrap();
    session.name_conversation(&mut state, "first").unwrap();
    session.name_conversation(&mut state, "second").unwrap();

    assert_eq!(session.chats().list_names(), vec!["first", "second"]);
    assert_eq!(state.chat_name.as_deref(), Some("second"));
}

#[tokio::test]
async fn load_replaces_messages_wholesale() {
    let provider = MockProvider::new();
    let (dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();
    session.submit(&mut state, "saved question").await.unwrap();
    session.name_conversation(&mut state, "saved").unwrap();
    session.name_conversation(&mut state, "").unwrap();
    session.clear_conversation(&mut state).unwrap();
    session.submit(&mut state, "scratch").await.unwrap();

    let mut session = session_in(&dir, provider);
    session.load_conversation(&mut state, "saved").unwrap();

    assert_eq!(state.chat_name.as_deref(), Some("saved"));
    assert_eq!(state.messages[0], ChatMessage::user("saved question"));
    assert_eq!(state.messages.len(), 2);
}

#[tokio::test]
async fn loading_unknown_chat_fails_and_keeps_state() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "keep me").await.unwrap();
    let before = state.clone();

    let err = session.load_conversation(&mut state, "nope").unwrap_err();
    assert!(matches!(err, BurnerError::ChatNotFound(name) if name == "nope"));
    assert_eq!(state, before);
}

#[tokio::test]
async fn clearing_named_conversation_deletes_it() {
    let provider = MockProvider::new();
    let (dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "bye soon").await.unwrap();
    session.name_conversation(&mut state, "temp").unwrap();

    session.clear_conversation(&mut state).unwrap();

    assert!(state.messages.is_empty());
    assert!(!state.is_named());
    let chats = ChatStore::load(dir.path().join("saved_chats.json")).unwrap();
    assert_eq!(chats.get("temp"), None);
}

#[tokio::test]
async fn clearing_unnamed_conversation_touches_no_files() {
    let provider = MockProvider::new();
    let (dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "scratch").await.unwrap();

    session.clear_conversation(&mut state).unwrap();
    assert!(state.messages.is_empty());
    assert!(!dir.path().join("saved_chats.json").exists());
}

#[tokio::test]
async fn selected_prompt_is_used_for_next_turn() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider.clone());
    let mut state = session.initial_state();
    assert_eq!(state.selected_prompt, DEFAULT_PROMPT_NAME);

    session.create_prompt("Terse", "Reply in five words.").unwrap();
    session.select_prompt(&mut state, "Terse").unwrap();
    session.submit(&mut state, "explain rust").await.unwrap();

    assert_eq!(
        provider.last_request().unwrap().system_prompt,
        "Reply in five words."
    );
}

#[tokio::test]
async fn selecting_unknown_prompt_fails() {
    let provider = MockProvider::new();
    let (_dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();

    let err = session.select_prompt(&mut state, "Missing").unwrap_err();
    assert!(matches!(err, BurnerError::PromptNotFound(_)));
    assert_eq!(state.selected_prompt, DEFAULT_PROMPT_NAME);
}

#[test]
fn create_prompt_requires_name_and_content() {
    let (_dir, mut session) = temp_session(MockProvider::new());

    assert!(matches!(
        session.create_prompt(" ", "content"),
        Err(BurnerError::InvalidArgument(_))
    ));
    assert!(matches!(
        session.create_prompt("Name", "\n"),
        Err(BurnerError::InvalidArgument(_))
    ));
    assert_eq!(session.prompts().list_names(), vec![DEFAULT_PROMPT_NAME]);
}

#[test]
fn created_prompts_survive_restart() {
    let provider = MockProvider::new();
    let (dir, mut session) = temp_session(provider.clone());
    session.create_prompt("Poet", "Answer in verse.").unwrap();

    let session = session_in(&dir, provider);
    assert_eq!(session.prompts().get("Poet"), Some("Answer in verse."));
}

#[tokio::test]
async fn render_escapes_conversation() {
    let provider = MockProvider::new();
    provider.queue_reply("Use <em>emphasis</em> & care");
    let (_dir, mut session) = temp_session(provider);
    let mut state = session.initial_state();
    session.submit(&mut state, "Hello <b>").await.unwrap();

    let html = session.render(&state, "12:00");
    assert!(html.contains("Hello &lt;b&gt;"));
    assert!(html.contains("Use &lt;em&gt;emphasis&lt;/em&gt; &amp; care"));
    assert!(!html.contains("<em>"));
}
