//! Follow-up judge port

use async_trait::async_trait;
use boardroom_domain::Role;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while judging an answer
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("Judge unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Could not parse verdict: {0}")]
    InvalidVerdict(String),
}

/// Structured decision on whether an answer warrants one clarifying
/// follow-up. Deserializes directly from the judge's JSON reply.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowupVerdict {
    pub needs_followup: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, rename = "followup_question")]
    pub question: Option<String>,
}

impl FollowupVerdict {
    /// Verdict meaning "the answer was adequate"
    pub fn adequate() -> Self {
        Self {
            needs_followup: false,
            reason: None,
            question: None,
        }
    }
}

/// Port for the external judge that inspects a presenter's answer
#[async_trait]
pub trait FollowupJudge: Send + Sync {
    async fn judge(
        &self,
        role: Role,
        question: &str,
        answer: &str,
    ) -> Result<FollowupVerdict, JudgeError>;
}

/// Judge that never requests a follow-up, for offline mode and tests
pub struct NoFollowupJudge;

#[async_trait]
impl FollowupJudge for NoFollowupJudge {
    async fn judge(
        &self,
        _role: Role,
        _question: &str,
        _answer: &str,
    ) -> Result<FollowupVerdict, JudgeError> {
        Ok(FollowupVerdict::adequate())
    }
}
