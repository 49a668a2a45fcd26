//! Engine tuning parameters

use std::time::Duration;

/// Knobs for synthesis, judging, and context windows.
///
/// Defaults match the behavior described in the engine contracts; the
/// infrastructure config layer may override individual fields.
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Upper bound on one external generation call
    pub generation_timeout: Duration,
    /// Upper bound on one follow-up judgment call
    pub judge_timeout: Duration,
    /// Answered exchanges included in generation prompts
    pub history_window: usize,
    /// Recent questions checked by de-duplication
    pub dedup_window: usize,
    /// Topic re-picks before falling back to templates
    pub max_topic_retries: usize,
    /// Generated questions shorter than this are rejected
    pub min_question_len: usize,
    /// Answers shorter than this never trigger a follow-up
    pub min_answer_len: usize,
    /// Answers are clipped to this many chars in prompt context
    pub answer_clip_len: usize,
    /// Document chars kept as generation context
    pub document_context_len: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(20),
            judge_timeout: Duration::from_secs(10),
            history_window: 5,
            dedup_window: 5,
            max_topic_retries: 2,
            min_question_len: 16,
            min_answer_len: 20,
            answer_clip_len: 200,
            document_context_len: 60_000,
        }
    }
}
