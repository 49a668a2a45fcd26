//! End Session use case

use crate::ports::store::SessionStore;
use crate::use_cases::shared::EngineError;
use boardroom_domain::{AnswerModality, SessionLimit};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Summary of a completed panel session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub company_name: String,
    pub report_type: String,
    pub limit: SessionLimit,
    pub total_questions: usize,
    pub total_followups: usize,
    pub total_answers: usize,
    pub text_answers: usize,
    pub audio_answers: usize,
    pub roles_involved: Vec<String>,
}

pub struct EndSessionUseCase {
    store: Arc<dyn SessionStore>,
}

impl EndSessionUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Mark the session ended (when it is not already) and summarize it
    pub async fn execute(&self, session_id: &str) -> Result<SessionSummary, EngineError> {
        let _event_guard = self.store.lock(session_id).await;
        let mut session = self.store.get(session_id).await?;

        if !session.is_ended() {
            session.end();
            self.store.update(session.clone()).await?;
        }

        let turns = session.log().turns();
        let total_questions = turns.iter().filter(|t| !t.is_closing).count();
        let total_followups = turns.iter().filter(|t| t.is_followup).count();
        let answers: Vec<_> = turns.iter().filter_map(|t| t.answer.as_ref()).collect();
        let audio_answers = answers
            .iter()
            .filter(|a| a.modality == AnswerModality::Audio)
            .count();

        let summary = SessionSummary {
            session_id: session.id().to_string(),
            company_name: session.meta().company_name.clone(),
            report_type: session.meta().report_type.clone(),
            limit: session.limit(),
            total_questions,
            total_followups,
            total_answers: answers.len(),
            text_answers: answers.len() - audio_answers,
            audio_answers,
            roles_involved: session
                .log()
                .roles_involved()
                .into_iter()
                .map(|r| r.title().to_string())
                .collect(),
        };

        info!(session = %session_id, questions = total_questions, "session summarized");
        Ok(summary)
    }

    /// Plain-text transcript of the session's conversation
    pub async fn transcript(&self, session_id: &str) -> Result<String, EngineError> {
        let session = self.store.get(session_id).await?;
        Ok(session.transcript())
    }
}
