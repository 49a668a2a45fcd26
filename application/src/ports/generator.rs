//! External question generator port

use async_trait::async_trait;
use boardroom_domain::{ExchangeContext, Role, SessionMeta};
use thiserror::Error;

/// Errors that can occur while generating a question externally
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Generator unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Everything the external generator needs to condition one question
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub role: Role,
    pub topic: String,
    pub meta: SessionMeta,
    /// Truncated document text
    pub document_context: String,
    /// Recent answered exchanges, oldest first, answers already clipped
    pub history: Vec<ExchangeContext>,
    /// 1-indexed number of the question being generated
    pub turn_number: u32,
}

/// Port for the external (LLM-backed) question generator.
///
/// Implementations perform the network call; the caller owns the
/// timeout and every fallback decision.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}
