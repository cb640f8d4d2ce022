use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use nx_core::{Error, Result};

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Answer a model returns when it cannot find what was asked for.
/// Callers treat it the same as an empty or failed response.
pub const NOT_FOUND_SENTINEL: &str = "NONE";

/// A single chat-style completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait::async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// One blocking round-trip, no internal retry. Transport and decode
    /// failures surface as [`Error::Inference`] for the caller to handle.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub model_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_id: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub fn create_model(kind: &str, config: CompletionConfig) -> Result<Arc<dyn CompletionModel>> {
    match kind {
        "dummy" => Ok(Arc::new(DummyModel)),
        "openai" => Ok(Arc::new(OpenAiModel::new(config)?)),
        other => Err(Error::Inference(format!(
            "unknown completion model: {}. Available models: dummy, openai",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model_dummy() {
        let model = create_model("dummy", CompletionConfig::default()).unwrap();
        assert_eq!(model.name(), "Dummy");
    }

    #[test]
    fn test_create_model_unknown() {
        let result = create_model("magic", CompletionConfig::default());
        assert!(matches!(result, Err(Error::Inference(_))));
    }
}
