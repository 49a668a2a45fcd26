//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No roles configured for the panel")]
    NoRoles,

    #[error("Answer text cannot be empty")]
    EmptyAnswer,

    #[error("Session has already ended")]
    SessionEnded,

    #[error("No question is awaiting an answer")]
    NoPendingQuestion,

    #[error("Invalid session state: {0}")]
    InvalidState(String),
}
