//! Session aggregate
//!
//! A `Session` owns everything one presenter run touches: the roster of
//! panel roles, the topic bank, the used-topic set, the conversation
//! log, and the lifecycle state. It is mutated by exactly one engine
//! event at a time and persisted as a whole at the end of the event.

use crate::core::error::DomainError;
use crate::core::role::Role;
use crate::session::log::ConversationLog;
use crate::session::turn::{AnswerModality, Turn};
use crate::topic::TopicBank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Presentation metadata supplied at upload time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub company_name: String,
    pub industry: String,
    pub report_type: String,
}

impl Default for SessionMeta {
    fn default() -> Self {
        Self {
            company_name: "Your Company".to_string(),
            industry: "Technology".to_string(),
            report_type: "Business Plan".to_string(),
        }
    }
}

/// How the session decides it is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionLimit {
    /// Maximum number of limit-counting questions
    Questions(u32),
    /// Maximum wall-clock seconds since the session started
    Seconds(u64),
}

/// Lifecycle state machine: Setup -> Active -> Closing -> Ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Setup,
    Active,
    Closing,
    Ended,
}

/// Per-session toggles from the upload form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionOptions {
    pub followups_enabled: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            followups_enabled: true,
        }
    }
}

/// One presenter run (Aggregate root)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: String,
    meta: SessionMeta,
    roles: Vec<Role>,
    limit: SessionLimit,
    options: SessionOptions,
    state: SessionState,
    /// Count of limit-counting questions asked so far
    question_count: u32,
    started_at: DateTime<Utc>,
    topic_bank: TopicBank,
    used_topics: BTreeSet<usize>,
    /// Truncated document text used as generation context
    document_context: String,
    log: ConversationLog,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        meta: SessionMeta,
        roles: Vec<Role>,
        limit: SessionLimit,
        options: SessionOptions,
        topic_bank: TopicBank,
        document_context: String,
        started_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if roles.is_empty() {
            return Err(DomainError::NoRoles);
        }

        Ok(Self {
            id: id.into(),
            meta,
            roles,
            limit,
            options,
            state: SessionState::Setup,
            question_count: 0,
            started_at,
            topic_bank,
            used_topics: BTreeSet::new(),
            document_context,
            log: ConversationLog::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn limit(&self) -> SessionLimit {
        self.limit
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn topic_bank(&self) -> &TopicBank {
        &self.topic_bank
    }

    pub fn used_topics(&self) -> &BTreeSet<usize> {
        &self.used_topics
    }

    pub fn document_context(&self) -> &str {
        &self.document_context
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// The role that opens and closes the panel: CEO when present,
    /// otherwise the first configured role.
    pub fn lead_role(&self) -> Role {
        if self.roles.contains(&Role::Ceo) {
            Role::Ceo
        } else {
            self.roles[0]
        }
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn activate(&mut self) -> Result<(), DomainError> {
        match self.state {
            SessionState::Setup => {
                self.state = SessionState::Active;
                Ok(())
            }
            other => Err(DomainError::InvalidState(format!(
                "cannot activate from {other:?}"
            ))),
        }
    }

    /// Whether asking one more question would exceed the configured
    /// limit. The check uses the prospective post-increment count, so a
    /// limit of N never yields an (N+1)-th question.
    pub fn limit_reached(&self, now: DateTime<Utc>) -> bool {
        match self.limit {
            SessionLimit::Questions(n) => self.question_count + 1 > n,
            SessionLimit::Seconds(secs) => {
                let elapsed = (now - self.started_at).num_seconds().max(0) as u64;
                elapsed > secs
            }
        }
    }

    /// True when the log shows three identical consecutive questions
    pub fn breaker_tripped(&self) -> bool {
        self.log.last_questions_degenerate()
    }

    /// Append a limit-counting question and bump the counter
    pub fn record_question(
        &mut self,
        role: Role,
        question: impl Into<String>,
        topic_index: Option<usize>,
        asked_at: DateTime<Utc>,
    ) -> Result<&Turn, DomainError> {
        if self.is_ended() {
            return Err(DomainError::SessionEnded);
        }

        let turn = Turn::question(self.log.next_seq(), role, question, topic_index, asked_at);
        self.question_count += 1;
        if let Some(index) = topic_index {
            self.used_topics.insert(index);
        }
        self.log.append(turn);
        Ok(self.log.last_turn().expect("just appended"))
    }

    /// Append a follow-up; does not count against the limit
    pub fn record_followup(
        &mut self,
        role: Role,
        question: impl Into<String>,
        asked_at: DateTime<Utc>,
    ) -> Result<&Turn, DomainError> {
        if self.is_ended() {
            return Err(DomainError::SessionEnded);
        }

        let turn = Turn::followup(self.log.next_seq(), role, question, asked_at);
        self.log.append(turn);
        Ok(self.log.last_turn().expect("just appended"))
    }

    /// Attach the presenter's answer to the pending question
    pub fn record_answer(
        &mut self,
        text: impl Into<String>,
        modality: AnswerModality,
        answered_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.is_ended() {
            return Err(DomainError::SessionEnded);
        }

        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyAnswer);
        }

        match self.log.last_turn_mut() {
            Some(turn) if !turn.is_answered() && !turn.is_closing => {
                turn.record_answer(text, modality, answered_at);
                Ok(())
            }
            _ => Err(DomainError::NoPendingQuestion),
        }
    }

    /// Emit the terminal closing turn and end the session.
    ///
    /// The Closing state is transient: it exists only within the event
    /// that emits the closing message, so this transitions
    /// Active -> Closing -> Ended in one step.
    pub fn close(
        &mut self,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<&Turn, DomainError> {
        if self.is_ended() {
            return Err(DomainError::SessionEnded);
        }

        self.state = SessionState::Closing;
        let turn = Turn::closing(self.log.next_seq(), self.lead_role(), message, now);
        self.log.append(turn);
        self.state = SessionState::Ended;
        Ok(self.log.last_turn().expect("just appended"))
    }

    /// End without a closing turn (explicit `end_session` call)
    pub fn end(&mut self) {
        self.state = SessionState::Ended;
    }

    /// Render the conversation as a plain-text transcript
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Executive Panel Session Transcript\nCompany: {}\nIndustry: {}\nReport: {}\n\n",
            self.meta.company_name, self.meta.industry, self.meta.report_type
        ));

        for turn in self.log.turns() {
            let marker = if turn.is_closing {
                " [Closing]"
            } else if turn.is_followup {
                " [Follow-up]"
            } else {
                ""
            };
            out.push_str(&format!(
                "{} ({}) at {}\nQ{}: {}\n",
                turn.role.display_name(),
                turn.role,
                turn.asked_at.format("%H:%M:%S"),
                marker,
                turn.question
            ));
            if let Some(answer) = &turn.answer {
                out.push_str(&format!(
                    "A [{}] at {}: {}\n",
                    match answer.modality {
                        AnswerModality::Text => "text",
                        AnswerModality::Audio => "audio",
                    },
                    answer.answered_at.format("%H:%M:%S"),
                    answer.text
                ));
            }
            out.push('\n');
        }

        out
    }
}
