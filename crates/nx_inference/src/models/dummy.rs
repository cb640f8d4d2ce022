use nx_core::Result;

use super::{CompletionModel, CompletionRequest, NOT_FOUND_SENTINEL};

/// Offline model that always reports it found nothing.
///
/// Useful for running extraction without network access: every chain that
/// consults the model simply falls through to its structural fallbacks.
#[derive(Debug, Clone)]
pub struct DummyModel;

#[async_trait::async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Ok(NOT_FOUND_SENTINEL.to_string())
    }
}
