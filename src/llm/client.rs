//! Core LLM client trait and a scripted mock

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::LlmError;

/// Stateless model client - each call is independent and carries no session
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt to `model` and wait for the complete generated text
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;

    /// Model used when the caller does not name one
    fn default_model(&self) -> &str;
}

/// A recorded call made against [`MockLlmClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub model: String,
    pub prompt: String,
}

/// In-memory client that replays scripted results and records every call.
///
/// Once the script is exhausted it answers with `mock response: {prompt}`.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockLlmClient {
    pub const MODEL: &'static str = "mock-model";

    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.script).push_back(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn with_error(self, err: LlmError) -> Self {
        lock(&self.script).push_back(Err(err));
        self
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        lock(&self.calls).push(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Ok(format!("mock response: {}", prompt)))
    }

    fn default_model(&self) -> &str {
        Self::MODEL
    }
}
