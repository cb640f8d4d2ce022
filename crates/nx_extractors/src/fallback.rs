use async_trait::async_trait;
use tracing::debug;

use nx_core::{ArticleContent, Error, Result};

use crate::extractors::ArticleExtractor;

/// Orchestrates an ordered list of strategies for one source family.
///
/// Strategies are tried in priority order and the first success wins;
/// later strategies are never invoked after a success. Only when every
/// strategy has failed does the orchestrator raise, with one reason per
/// strategy so all contributing causes are visible at once.
pub struct FallbackExtractor {
    name: &'static str,
    extractors: Vec<Box<dyn ArticleExtractor>>,
}

impl FallbackExtractor {
    pub fn new(name: &'static str, extractors: Vec<Box<dyn ArticleExtractor>>) -> Self {
        Self { name, extractors }
    }
}

#[async_trait]
impl ArticleExtractor for FallbackExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn extract(&self, html: &str, url: &str) -> Result<ArticleContent> {
        let mut failures: Vec<(&'static str, String)> = Vec::new();

        for extractor in &self.extractors {
            match extractor.extract(html, url).await {
                Ok(content) => {
                    debug!("Extractor {} succeeded for {}", extractor.name(), url);
                    return Ok(content);
                }
                Err(e) => {
                    debug!(
                        "Extractor {} failed for {}: {}. Trying next strategy.",
                        extractor.name(),
                        url,
                        e
                    );
                    failures.push((extractor.name(), e.to_string()));
                }
            }
        }

        let reasons = failures
            .iter()
            .map(|(name, reason)| format!("{}: {}", name, reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::CombinedExtraction {
            url: url.to_string(),
            reasons,
        })
    }
}
