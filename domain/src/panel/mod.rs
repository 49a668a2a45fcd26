//! Panel decision logic: rotation, de-duplication, and templates

pub mod dedup;
pub mod rotation;
pub mod templates;
