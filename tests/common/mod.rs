//! Shared test helpers and mock provider.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use burner::error::BurnerError;
use burner::provider::ChatProvider;
use burner::session::ChatSession;
use burner::store::{ChatStore, PromptStore};
use burner::types::ChatMessage;

/// A request exactly as the mock received it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub messages: Vec<ChatMessage>,
    pub system_prompt: String,
}

/// Queued mock reply.
pub enum MockReply {
    Text(String),
    Fail(fn() -> BurnerError),
}

/// A provider that returns canned replies and records every call.
///
/// Clones share the same queue and request log, so a test can keep one
/// handle after boxing another into a session.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text reply.
    pub fn queue_reply(&self, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.to_string()));
    }

    /// Queue a failure.
    pub fn queue_failure(&self, make: fn() -> BurnerError) {
        self.replies.lock().unwrap().push_back(MockReply::Fail(make));
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<CapturedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        system_prompt: &str,
    ) -> Result<String, BurnerError> {
        self.requests.lock().unwrap().push(CapturedRequest {
            messages: messages.to_vec(),
            system_prompt: system_prompt.to_string(),
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail(make)) => Err(make()),
            None => Ok("Mock response".to_string()),
        }
    }
}

/// A session over stores in a fresh temp dir.
pub fn temp_session(provider: MockProvider) -> (TempDir, ChatSession) {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir, provider);
    (dir, session)
}

/// A session over the stores already in `dir`.
pub fn session_in(dir: &TempDir, provider: MockProvider) -> ChatSession {
    let prompts = PromptStore::load(dir.path().join("system_prompts.json")).unwrap();
    let chats = ChatStore::load(dir.path().join("saved_chats.json")).unwrap();
    ChatSession::new(prompts, chats, Box::new(provider))
}
