//! LLM Client Layer - remote generative model access
//!
//! This module provides:
//! - LlmClient trait for API abstraction
//! - GeminiClient implementation
//! - MockLlmClient for tests and offline use
//! - LlmError and its fault classification

pub mod client;
pub mod error;
pub mod gemini;

pub use client::{LlmClient, MockCall, MockLlmClient};
pub use error::LlmError;
pub use gemini::{GeminiClient, GeminiConfig};
