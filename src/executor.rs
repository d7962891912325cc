//! Prompt Executor - pass a prompt through to a model and hand back the text
//!
//! `execute` is total: every failure is logged with its fault kind and
//! reported as `None`. The prompt text itself is never logged.

use log::{error, info, warn};

use crate::llm::{LlmClient, LlmError};

/// Runs single prompts against an [`LlmClient`]
pub struct PromptExecutor<C: LlmClient> {
    client: C,
}

impl<C: LlmClient> PromptExecutor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Model used when `execute` is called without one
    pub fn default_model(&self) -> &str {
        self.client.default_model()
    }

    /// Execute a prompt, returning the generated text or `None` on any failure.
    ///
    /// `model` overrides the client's default model.
    pub async fn execute(&self, prompt: &str, model: Option<&str>) -> Option<String> {
        let model = model.unwrap_or_else(|| self.client.default_model());
        match self.try_execute(prompt, Some(model)).await {
            Ok(text) => {
                info!("Model '{}' returned {} bytes", model, text.len());
                Some(text)
            }
            Err(e) => {
                error!("{} fault while executing prompt on model '{}': {}", e.kind(), model, e);
                if e.is_rate_limit()
                    && let Some(wait) = e.retry_after()
                {
                    warn!("Model '{}' is rate limited; service asks to wait {}s", model, wait.as_secs());
                }
                None
            }
        }
    }

    /// Fallible form of [`execute`](Self::execute). Exactly one attempt.
    pub async fn try_execute(&self, prompt: &str, model: Option<&str>) -> Result<String, LlmError> {
        let model = model.unwrap_or_else(|| self.client.default_model());
        self.client.generate(model, prompt).await
    }
}

impl<C: LlmClient + std::fmt::Debug> std::fmt::Debug for PromptExecutor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptExecutor").field("client", &self.client).finish()
    }
}
