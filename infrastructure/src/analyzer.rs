//! Offline document analyzer

use async_trait::async_trait;
use boardroom_application::ports::analyzer::{AnalyzerError, DocumentAnalyzer};
use boardroom_domain::SessionMeta;

/// Analyzer for offline mode: always reports unavailable, which makes
/// the session start from the built-in fallback topic bank.
pub struct OfflineAnalyzer;

#[async_trait]
impl DocumentAnalyzer for OfflineAnalyzer {
    async fn analyze(
        &self,
        _meta: &SessionMeta,
        _document: &str,
    ) -> Result<Vec<String>, AnalyzerError> {
        Err(AnalyzerError::Unavailable)
    }
}
