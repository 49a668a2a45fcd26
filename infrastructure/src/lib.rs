//! Infrastructure layer for boardroom
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod analyzer;
pub mod config;
pub mod openai;
pub mod random;
pub mod store;

// Re-export commonly used types
pub use analyzer::OfflineAnalyzer;
pub use config::{ConfigLoader, FileConfig, FileEngineConfig, FileGeneratorConfig};
pub use openai::{ChatError, OpenAiConfig, OpenAiGateway};
pub use random::ThreadRandom;
pub use store::InMemorySessionStore;
