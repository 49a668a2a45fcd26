//! Follow-up Evaluator
//!
//! Decides whether the role that just heard an answer gets one
//! clarifying follow-up before rotation continues. Cheap guards run
//! before any external call, and every judge failure reads as "no
//! follow-up needed": this path can skip a follow-up but never break
//! the presenter-facing flow.

use crate::config::EngineParams;
use crate::ports::judge::FollowupJudge;
use boardroom_domain::{Session, Turn};
use std::sync::Arc;
use tracing::debug;

pub struct FollowupEvaluator {
    judge: Arc<dyn FollowupJudge>,
    params: EngineParams,
}

impl FollowupEvaluator {
    pub fn new(judge: Arc<dyn FollowupJudge>, params: EngineParams) -> Self {
        Self { judge, params }
    }

    /// Returns the follow-up question to ask, or `None` to rotate on.
    ///
    /// `answered` is the turn whose answer just arrived. Guards, in
    /// order: follow-ups disabled, odd turn number (follow-ups are only
    /// offered on even turns), the prior question was itself a
    /// follow-up (at most one per original question), answer too short.
    pub async fn evaluate(&self, session: &Session, answered: &Turn) -> Option<String> {
        if !session.options().followups_enabled {
            return None;
        }

        let turn_number = session.question_count();
        if turn_number % 2 != 0 {
            return None;
        }

        if answered.is_followup || answered.is_closing {
            return None;
        }

        let answer = answered.answer.as_ref()?;
        if answer.text.chars().count() < self.params.min_answer_len {
            return None;
        }

        let judgment = tokio::time::timeout(
            self.params.judge_timeout,
            self.judge.judge(answered.role, &answered.question, &answer.text),
        )
        .await;

        match judgment {
            Ok(Ok(verdict)) if verdict.needs_followup => {
                if let Some(reason) = &verdict.reason {
                    debug!(role = %answered.role, reason, "follow-up warranted");
                }
                verdict.question.filter(|q| !q.trim().is_empty())
            }
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                debug!("follow-up judge failed, skipping follow-up: {e}");
                None
            }
            Err(_) => {
                debug!("follow-up judge timed out, skipping follow-up");
                None
            }
        }
    }
}
