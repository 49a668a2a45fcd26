//! OpenAI-compatible gateway implementing the generator, judge, and
//! analyzer ports

use super::protocol::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, strip_code_fences};
use async_trait::async_trait;
use boardroom_application::ports::analyzer::{AnalyzerError, DocumentAnalyzer};
use boardroom_application::ports::generator::{GenerationRequest, GeneratorError, QuestionGenerator};
use boardroom_application::ports::judge::{FollowupJudge, FollowupVerdict, JudgeError};
use boardroom_domain::{PromptTemplate, Role, SessionMeta};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Connection settings for one OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions URL
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Errors from one chat completion round-trip
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reply contained no content")]
    EmptyReply,
}

/// Adapter for any chat-completions endpoint speaking the OpenAI wire
/// format. One instance serves all three AI-facing ports.
pub struct OpenAiGateway {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// One chat round-trip returning the first choice's text
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        json_mode: bool,
    ) -> Result<String, ChatError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: json_mode.then(ResponseFormat::json_object),
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::Request(format!("malformed reply: {e}")))?;

        match reply.content() {
            Some(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
            _ => Err(ChatError::EmptyReply),
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let messages = vec![
            ChatMessage::system(PromptTemplate::generation_system(request.role)),
            ChatMessage::user(PromptTemplate::generation_prompt(
                request.role,
                &request.topic,
                &request.meta,
                &request.document_context,
                &request.history,
            )),
        ];

        let text = self
            .chat(messages, false)
            .await
            .map_err(|e| GeneratorError::RequestFailed(e.to_string()))?;

        // Some models wrap the question in quotes.
        Ok(text.trim_matches('"').trim().to_string())
    }
}

/// Analyzer reply shape: `{"key_details": ["...", ...]}`
#[derive(Debug, Deserialize)]
struct AnalysisReply {
    key_details: Vec<String>,
}

#[async_trait]
impl DocumentAnalyzer for OpenAiGateway {
    async fn analyze(
        &self,
        meta: &SessionMeta,
        document: &str,
    ) -> Result<Vec<String>, AnalyzerError> {
        let messages = vec![
            ChatMessage::system(PromptTemplate::analyzer_system()),
            ChatMessage::user(PromptTemplate::analyzer_prompt(meta, document)),
        ];

        let text = self
            .chat(messages, true)
            .await
            .map_err(|e| AnalyzerError::RequestFailed(e.to_string()))?;

        let reply: AnalysisReply = serde_json::from_str(strip_code_fences(&text))
            .map_err(|e| AnalyzerError::InvalidAnalysis(e.to_string()))?;

        debug!(items = reply.key_details.len(), "document analysis complete");
        Ok(reply.key_details)
    }
}

#[async_trait]
impl FollowupJudge for OpenAiGateway {
    async fn judge(
        &self,
        role: Role,
        question: &str,
        answer: &str,
    ) -> Result<FollowupVerdict, JudgeError> {
        let messages = vec![
            ChatMessage::system(PromptTemplate::judge_system()),
            ChatMessage::user(PromptTemplate::judge_prompt(role, question, answer)),
        ];

        let text = self
            .chat(messages, true)
            .await
            .map_err(|e| JudgeError::RequestFailed(e.to_string()))?;

        serde_json::from_str(strip_code_fences(&text))
            .map_err(|e| JudgeError::InvalidVerdict(e.to_string()))
    }
}
