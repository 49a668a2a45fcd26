//! Domain layer for boardroom
//!
//! This crate contains the panel's core entities and pure decision
//! logic. It has no dependencies on infrastructure or presentation
//! concerns, and no async code.
//!
//! # Core Concepts
//!
//! - **Session**: one presenter run, from document submission to the
//!   closing message. Owns the topic bank, the used-topic set, and the
//!   conversation log.
//! - **Rotation**: which executive role speaks next, balanced by turn
//!   counts with fair round-robin among ties.
//! - **De-duplication**: significant-word overlap test that rejects
//!   questions repeating recent ones.
//! - **Templates**: the deterministic question supplier used when the
//!   external generator is unavailable or degenerates.

pub mod core;
pub mod panel;
pub mod prompt;
pub mod session;
pub mod topic;
pub mod util;

// Re-export commonly used types
pub use crate::core::{error::DomainError, role::Role};
pub use panel::{
    dedup::{duplicates_any, is_duplicate, significant_words},
    rotation::next_role,
    templates::{closing_messages, template_question, topic_snippet},
};
pub use prompt::{ExchangeContext, PromptTemplate};
pub use session::{
    entities::{Session, SessionLimit, SessionMeta, SessionOptions, SessionState},
    log::ConversationLog,
    turn::{Answer, AnswerModality, Turn},
};
pub use topic::{Topic, TopicBank};
pub use util::{clip, truncate_for_context};
