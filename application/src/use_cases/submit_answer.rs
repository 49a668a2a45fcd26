//! Submit Answer use case
//!
//! The heart of the Session Lifecycle Controller: one "presenter
//! answered" event, handled to completion under the per-session event
//! lock. Appends the answer, runs the circuit breaker, offers at most
//! one follow-up, enforces the limit with the prospective next count,
//! and otherwise rotates to the next role's question.

use crate::evaluator::FollowupEvaluator;
use crate::ports::random::RandomSource;
use crate::ports::store::SessionStore;
use crate::synthesizer::{QuestionSynthesizer, SynthesisMode};
use crate::use_cases::shared::{EngineError, Prompt, PromptView, close_session};
use boardroom_domain::{AnswerModality, next_role};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the SubmitAnswer use case
#[derive(Debug, Clone)]
pub struct SubmitAnswerInput {
    pub session_id: String,
    pub answer: String,
    pub modality: AnswerModality,
}

pub struct SubmitAnswerUseCase {
    synthesizer: Arc<QuestionSynthesizer>,
    evaluator: FollowupEvaluator,
    store: Arc<dyn SessionStore>,
    random: Arc<dyn RandomSource>,
}

impl SubmitAnswerUseCase {
    pub fn new(
        synthesizer: Arc<QuestionSynthesizer>,
        evaluator: FollowupEvaluator,
        store: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            synthesizer,
            evaluator,
            store,
            random,
        }
    }

    pub async fn execute(&self, input: SubmitAnswerInput) -> Result<Prompt, EngineError> {
        // Reject malformed input before touching any state.
        if input.answer.trim().is_empty() {
            return Err(EngineError::EmptyAnswer);
        }

        let _event_guard = self.store.lock(&input.session_id).await;
        let mut session = self.store.get(&input.session_id).await?;

        if session.is_ended() {
            return Err(EngineError::SessionEnded(input.session_id));
        }

        session.record_answer(&input.answer, input.modality, Utc::now())?;
        let answered = session
            .log()
            .last_turn()
            .cloned()
            .expect("answer was just recorded");

        // Circuit breaker: a degenerate synthesizer loop forces closing
        // regardless of the remaining limit.
        if session.breaker_tripped() {
            warn!(session = %session.id(), "repeated identical questions, forcing session close");
            let prompt = close_session(&mut session, self.random.as_ref(), Utc::now())?;
            self.store.update(session).await?;
            return Ok(prompt);
        }

        // One clarifying follow-up, when warranted.
        if !answered.is_followup {
            if let Some(question) = self.evaluator.evaluate(&session, &answered).await {
                info!(session = %session.id(), role = %answered.role, "asking follow-up");
                let turn = session.record_followup(answered.role, question, Utc::now())?;
                let prompt = Prompt::FollowUp(PromptView::from_turn(turn));
                self.store.update(session).await?;
                return Ok(prompt);
            }
        }

        // Prospective next count: a limit of N never yields question N+1.
        let now = Utc::now();
        if session.limit_reached(now) {
            info!(
                session = %session.id(),
                questions = session.question_count(),
                "limit reached, closing session"
            );
            let prompt = close_session(&mut session, self.random.as_ref(), now)?;
            self.store.update(session).await?;
            return Ok(prompt);
        }

        let role = next_role(session.roles(), session.log()).ok_or(EngineError::NoRoles)?;
        let question = self
            .synthesizer
            .synthesize(&session, role, SynthesisMode::Rotation)
            .await;
        let turn = session.record_question(role, question.text, question.topic_index, Utc::now())?;
        let prompt = Prompt::Question(PromptView::from_turn(turn));

        info!(
            session = %session.id(),
            role = %role,
            number = session.question_count(),
            "next question issued"
        );
        self.store.update(session).await?;
        Ok(prompt)
    }
}
