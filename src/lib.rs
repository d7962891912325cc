//! metaprompt - run prompts against a generative model and keep prompt
//! templates on disk
//!
//! Two independent pieces:
//! - [`template::TemplateStore`] persists named, schema-less YAML templates
//! - [`executor::PromptExecutor`] passes a prompt to an [`llm::LlmClient`]
//!   and hands back the generated text

pub mod config;
pub mod error;
pub mod executor;
pub mod llm;
pub mod template;

pub use error::{FaultKind, MetapromptError, Result};
