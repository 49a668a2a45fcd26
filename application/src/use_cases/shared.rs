//! Types shared by the session lifecycle use cases

use crate::ports::random::RandomSource;
use crate::ports::store::StoreError;
use boardroom_domain::{DomainError, Role, Session, Turn, closing_messages};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the engine's caller.
///
/// Only malformed requests and invalid session state appear here;
/// external-dependency failures are absorbed by fallbacks upstream.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session {0} has already ended")]
    SessionEnded(String),

    #[error("Answer text cannot be empty")]
    EmptyAnswer,

    #[error("Document text cannot be empty")]
    EmptyDocument,

    #[error("At least one role must join the panel")]
    NoRoles,

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => EngineError::SessionNotFound(id),
            other => EngineError::Store(other),
        }
    }
}

/// A question, follow-up, or closing message rendered for the caller
#[derive(Debug, Clone, Serialize)]
pub struct PromptView {
    pub role: Role,
    pub title: String,
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_followup: bool,
    pub is_closing: bool,
}

impl PromptView {
    pub fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            title: turn.role.title().to_string(),
            speaker: turn.role.display_name().to_string(),
            text: turn.question.clone(),
            timestamp: turn.asked_at,
            is_followup: turn.is_followup,
            is_closing: turn.is_closing,
        }
    }
}

/// What the presenter gets back from one engine event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    Question(PromptView),
    FollowUp(PromptView),
    Closing(PromptView),
}

impl Prompt {
    pub fn view(&self) -> &PromptView {
        match self {
            Prompt::Question(v) | Prompt::FollowUp(v) | Prompt::Closing(v) => v,
        }
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, Prompt::Closing(_))
    }
}

/// Emit the terminal closing turn, message picked through the random
/// seam and attributed to the lead role.
pub fn close_session(
    session: &mut Session,
    random: &dyn RandomSource,
    now: DateTime<Utc>,
) -> Result<Prompt, EngineError> {
    let meta = session.meta();
    let messages = closing_messages(&meta.company_name, &meta.report_type);
    let message = messages[random.pick(messages.len())].clone();
    let turn = session.close(message, now)?;
    Ok(Prompt::Closing(PromptView::from_turn(turn)))
}
