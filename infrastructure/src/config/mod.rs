//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileEngineConfig, FileGeneratorConfig};
pub use loader::ConfigLoader;
