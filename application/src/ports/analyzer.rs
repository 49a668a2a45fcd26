//! Document analyzer port

use async_trait::async_trait;
use boardroom_domain::SessionMeta;
use thiserror::Error;

/// Errors that can occur during document analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Analyzer unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Could not parse analysis: {0}")]
    InvalidAnalysis(String),
}

/// Port for extracting challengeable discussion items from a document.
///
/// Callers treat any failure or empty result as "use the fallback
/// bank"; the engine never surfaces analyzer errors to the presenter.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, meta: &SessionMeta, document: &str)
    -> Result<Vec<String>, AnalyzerError>;
}
