//! Session aggregate, turns, and the conversation log

pub mod entities;
pub mod log;
pub mod turn;
