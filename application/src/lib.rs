//! Application layer for boardroom
//!
//! This crate contains the session lifecycle use cases, port
//! definitions, and engine parameters. It depends only on the domain
//! layer.

pub mod config;
pub mod evaluator;
pub mod ports;
pub mod synthesizer;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineParams;
pub use evaluator::FollowupEvaluator;
pub use ports::{
    analyzer::{AnalyzerError, DocumentAnalyzer},
    generator::{GenerationRequest, GeneratorError, QuestionGenerator},
    judge::{FollowupJudge, FollowupVerdict, JudgeError, NoFollowupJudge},
    random::{RandomSource, SequenceRandom},
    store::{SessionStore, StoreError},
};
pub use synthesizer::{
    ExternalSource, QuestionSource, QuestionSynthesizer, SynthesisMode, SynthesizedQuestion,
    TemplateSource,
};
pub use use_cases::end_session::{EndSessionUseCase, SessionSummary};
pub use use_cases::shared::{EngineError, Prompt, PromptView};
pub use use_cases::start_session::{SessionStarted, StartSessionInput, StartSessionUseCase};
pub use use_cases::submit_answer::{SubmitAnswerInput, SubmitAnswerUseCase};
