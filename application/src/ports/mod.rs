//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analyzer;
pub mod generator;
pub mod judge;
pub mod random;
pub mod store;
