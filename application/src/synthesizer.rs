//! Question Synthesizer
//!
//! Produces one question for a role: pick a topic the session has not
//! used, draw a candidate from the configured [`QuestionSource`],
//! validate it, and retry with a different topic or fall back to the
//! deterministic templates when the draw fails or degenerates.
//!
//! The entry point is total: it always returns a non-empty question,
//! never an error, so an AI outage can never dead-end the session.

use crate::config::EngineParams;
use crate::ports::generator::{GenerationRequest, GeneratorError, QuestionGenerator};
use crate::ports::random::RandomSource;
use async_trait::async_trait;
use boardroom_domain::{Role, Session, clip, duplicates_any, template_question};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Whether this is the opening question or a mid-session rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    Initial,
    Rotation,
}

/// A synthesized question plus the topic it targets (absent when the
/// fallback could not anchor to a topic)
#[derive(Debug, Clone)]
pub struct SynthesizedQuestion {
    pub text: String,
    pub topic_index: Option<usize>,
}

/// Strategy seam for drawing one candidate question
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn draw(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

/// Timeout-bounded draw from the external generator
pub struct ExternalSource {
    generator: Arc<dyn QuestionGenerator>,
    timeout: Duration,
}

impl ExternalSource {
    pub fn new(generator: Arc<dyn QuestionGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }
}

#[async_trait]
impl QuestionSource for ExternalSource {
    async fn draw(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(GeneratorError::Timeout),
        }
    }
}

/// Deterministic draw from the per-role template library
pub struct TemplateSource;

#[async_trait]
impl QuestionSource for TemplateSource {
    async fn draw(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let topic = (!request.topic.is_empty()).then_some(request.topic.as_str());
        Ok(template_question(request.role, request.turn_number, topic))
    }
}

/// Synthesizes one question per turn
pub struct QuestionSynthesizer {
    external: Option<ExternalSource>,
    random: Arc<dyn RandomSource>,
    params: EngineParams,
}

impl QuestionSynthesizer {
    pub fn new(
        generator: Option<Arc<dyn QuestionGenerator>>,
        random: Arc<dyn RandomSource>,
        params: EngineParams,
    ) -> Self {
        let external =
            generator.map(|g| ExternalSource::new(g, params.generation_timeout));
        Self {
            external,
            random,
            params,
        }
    }

    /// Produce the next question for `role`. Total: always returns a
    /// non-empty question.
    pub async fn synthesize(
        &self,
        session: &Session,
        role: Role,
        mode: SynthesisMode,
    ) -> SynthesizedQuestion {
        let recent: Vec<String> = session
            .log()
            .recent_questions(self.params.dedup_window)
            .into_iter()
            .map(str::to_string)
            .collect();
        let turn_number = session.question_count() + 1;

        let mut tried = BTreeSet::new();
        let mut last_topic = None;

        if let Some(external) = &self.external {
            for attempt in 0..=self.params.max_topic_retries {
                let Some(index) = self.select_topic(session, &tried) else {
                    break;
                };
                tried.insert(index);
                last_topic = Some(index);

                let request = self.request_for(session, role, index, turn_number);
                match external.draw(&request).await {
                    Ok(text) => {
                        let text = text.trim().to_string();
                        if self.is_valid(&text, &recent) {
                            debug!(role = %role, mode = ?mode, topic = index, "external question accepted");
                            return SynthesizedQuestion {
                                text,
                                topic_index: Some(index),
                            };
                        }
                        warn!(
                            role = %role,
                            attempt,
                            "generated question rejected (too short or duplicate), retrying"
                        );
                    }
                    Err(e) => {
                        warn!(role = %role, attempt, "question generation failed: {e}");
                    }
                }
            }
        }

        // Fall back to the deterministic template, anchored to the last
        // topic tried (or a fresh pick when no external draw ran).
        let index = last_topic.or_else(|| self.select_topic(session, &BTreeSet::new()));
        let request = GenerationRequest {
            role,
            topic: index
                .and_then(|i| session.topic_bank().get(i))
                .map(|t| t.text().to_string())
                .unwrap_or_default(),
            meta: session.meta().clone(),
            document_context: String::new(),
            history: Vec::new(),
            turn_number,
        };
        let text = TemplateSource
            .draw(&request)
            .await
            .expect("template source is infallible");

        debug!(role = %role, mode = ?mode, topic = ?index, "template question used");
        SynthesizedQuestion {
            text,
            topic_index: index,
        }
    }

    /// Pick a topic index: unused topics first, recycling the full bank
    /// once exhausted; `tried` excludes topics already attempted in
    /// this synthesis.
    fn select_topic(&self, session: &Session, tried: &BTreeSet<usize>) -> Option<usize> {
        let available = session
            .topic_bank()
            .available_indices(session.used_topics());
        let candidates: Vec<usize> = available
            .iter()
            .copied()
            .filter(|i| !tried.contains(i))
            .collect();
        let candidates = if candidates.is_empty() { available } else { candidates };

        if candidates.is_empty() {
            return None;
        }
        let pick = self.random.pick(candidates.len());
        Some(candidates[pick])
    }

    fn request_for(
        &self,
        session: &Session,
        role: Role,
        topic_index: usize,
        turn_number: u32,
    ) -> GenerationRequest {
        let history = session
            .log()
            .recent_exchanges(self.params.history_window)
            .into_iter()
            .map(|turn| boardroom_domain::ExchangeContext {
                role_title: turn.role.title().to_string(),
                question: turn.question.clone(),
                answer: turn
                    .answer
                    .as_ref()
                    .map(|a| clip(&a.text, self.params.answer_clip_len))
                    .unwrap_or_default(),
            })
            .collect();

        GenerationRequest {
            role,
            topic: session
                .topic_bank()
                .get(topic_index)
                .map(|t| t.text().to_string())
                .unwrap_or_default(),
            meta: session.meta().clone(),
            document_context: session.document_context().to_string(),
            history,
            turn_number,
        }
    }

    fn is_valid(&self, text: &str, recent: &[String]) -> bool {
        text.chars().count() >= self.params.min_question_len
            && !duplicates_any(text, recent.iter().map(String::as_str))
    }
}
