//! Turn entity: one question/answer exchange

use crate::core::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the presenter delivered an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerModality {
    Text,
    Audio,
}

/// A presenter answer attached to a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub modality: AnswerModality,
    pub answered_at: DateTime<Utc>,
}

/// One question (or follow-up, or closing statement) plus the
/// presenter's answer once it arrives.
///
/// Invariant: `answer.answered_at` is never earlier than `asked_at`;
/// [`Turn::record_answer`] clamps to enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub seq: usize,
    pub role: Role,
    pub question: String,
    pub is_followup: bool,
    pub is_closing: bool,
    /// Index into the session's topic bank; absent for follow-ups and
    /// closing statements.
    pub topic_index: Option<usize>,
    pub asked_at: DateTime<Utc>,
    pub answer: Option<Answer>,
}

impl Turn {
    pub fn question(
        seq: usize,
        role: Role,
        question: impl Into<String>,
        topic_index: Option<usize>,
        asked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seq,
            role,
            question: question.into(),
            is_followup: false,
            is_closing: false,
            topic_index,
            asked_at,
            answer: None,
        }
    }

    pub fn followup(
        seq: usize,
        role: Role,
        question: impl Into<String>,
        asked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seq,
            role,
            question: question.into(),
            is_followup: true,
            is_closing: false,
            topic_index: None,
            asked_at,
            answer: None,
        }
    }

    pub fn closing(
        seq: usize,
        role: Role,
        message: impl Into<String>,
        asked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seq,
            role,
            question: message.into(),
            is_followup: false,
            is_closing: true,
            topic_index: None,
            asked_at,
            answer: None,
        }
    }

    /// True for questions that count against the session's limit
    pub fn counts_toward_limit(&self) -> bool {
        !self.is_followup && !self.is_closing
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    /// Attach the presenter's answer. The timestamp is clamped so it
    /// never precedes the question's.
    pub fn record_answer(
        &mut self,
        text: impl Into<String>,
        modality: AnswerModality,
        answered_at: DateTime<Utc>,
    ) {
        let answered_at = answered_at.max(self.asked_at);
        self.answer = Some(Answer {
            text: text.into(),
            modality,
            answered_at,
        });
    }
}
