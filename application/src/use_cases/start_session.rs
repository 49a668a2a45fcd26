//! Start Session use case
//!
//! Analyzes the submitted document into a topic bank, creates the
//! session, and generates the opening question (Setup -> Active).

use crate::config::EngineParams;
use crate::ports::analyzer::DocumentAnalyzer;
use crate::ports::store::SessionStore;
use crate::synthesizer::{QuestionSynthesizer, SynthesisMode};
use crate::use_cases::shared::{EngineError, Prompt, PromptView};
use boardroom_domain::{
    Role, Session, SessionLimit, SessionMeta, SessionOptions, TopicBank, next_role,
    truncate_for_context,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Input for the StartSession use case
#[derive(Debug, Clone)]
pub struct StartSessionInput {
    pub document: String,
    pub meta: SessionMeta,
    pub roles: Vec<Role>,
    pub limit: SessionLimit,
    pub options: SessionOptions,
}

/// A freshly created session and its opening question
#[derive(Debug, Clone, Serialize)]
pub struct SessionStarted {
    pub session_id: String,
    pub first_question: PromptView,
    pub topic_count: usize,
}

pub struct StartSessionUseCase {
    analyzer: Arc<dyn DocumentAnalyzer>,
    synthesizer: Arc<QuestionSynthesizer>,
    store: Arc<dyn SessionStore>,
    params: EngineParams,
}

impl StartSessionUseCase {
    pub fn new(
        analyzer: Arc<dyn DocumentAnalyzer>,
        synthesizer: Arc<QuestionSynthesizer>,
        store: Arc<dyn SessionStore>,
        params: EngineParams,
    ) -> Self {
        Self {
            analyzer,
            synthesizer,
            store,
            params,
        }
    }

    pub async fn execute(&self, input: StartSessionInput) -> Result<SessionStarted, EngineError> {
        if input.roles.is_empty() {
            return Err(EngineError::NoRoles);
        }
        if input.document.trim().is_empty() {
            return Err(EngineError::EmptyDocument);
        }

        let topic_bank = self.analyze(&input).await;
        info!(
            company = %input.meta.company_name,
            topics = topic_bank.len(),
            "starting panel session"
        );

        let document_context =
            truncate_for_context(&input.document, self.params.document_context_len);
        let now = Utc::now();
        let mut session = Session::new(
            Uuid::new_v4().to_string(),
            input.meta,
            input.roles,
            input.limit,
            input.options,
            topic_bank,
            document_context,
            now,
        )?;

        let role = next_role(session.roles(), session.log()).ok_or(EngineError::NoRoles)?;
        let question = self
            .synthesizer
            .synthesize(&session, role, SynthesisMode::Initial)
            .await;

        session.activate()?;
        let turn = session.record_question(role, question.text, question.topic_index, Utc::now())?;
        let first_question = PromptView::from_turn(turn);

        let session_id = session.id().to_string();
        let topic_count = session.topic_bank().len();
        self.store.create(session).await?;

        info!(session = %session_id, role = %role, "first question issued");
        Ok(SessionStarted {
            session_id,
            first_question,
            topic_count,
        })
    }

    /// Build the topic bank, falling back to the static list when the
    /// analyzer fails or returns nothing usable.
    async fn analyze(&self, input: &StartSessionInput) -> TopicBank {
        let document = truncate_for_context(&input.document, self.params.document_context_len);
        match self.analyzer.analyze(&input.meta, &document).await {
            Ok(items) => TopicBank::from_items(items).unwrap_or_else(|| {
                warn!("analyzer returned no usable topics, using fallback bank");
                TopicBank::fallback(&input.meta.company_name, &input.meta.industry)
            }),
            Err(e) => {
                warn!("document analysis failed: {e}, using fallback bank");
                TopicBank::fallback(&input.meta.company_name, &input.meta.industry)
            }
        }
    }
}

impl SessionStarted {
    /// The opening question wrapped in the prompt envelope
    pub fn first_prompt(&self) -> Prompt {
        Prompt::Question(self.first_question.clone())
    }
}
