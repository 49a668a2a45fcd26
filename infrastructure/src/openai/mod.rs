//! Adapter for OpenAI-compatible chat completions endpoints

pub mod gateway;
pub mod protocol;

pub use gateway::{ChatError, OpenAiConfig, OpenAiGateway};
