use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;
use url::Url;

use nx_core::{ArticleContent, Error, Result};
use nx_inference::CompletionModel;

use crate::extractors::gleaner::{
    GleanerArchiveExtractor, GleanerHybridExtractor, GleanerLegacyExtractor,
};
use crate::extractors::ArticleExtractor;
use crate::fallback::FallbackExtractor;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes article URLs to the extractor registered for their hostname,
/// fetching the page on the caller's behalf.
pub struct ExtractionService {
    client: Client,
    extractors: HashMap<&'static str, Box<dyn ArticleExtractor>>,
}

impl ExtractionService {
    /// Build the service with the standard registry:
    /// the modern Gleaner site runs hybrid-then-legacy behind a fallback
    /// orchestrator, the newspaper archive runs the OCR strategy.
    pub fn new(model: Arc<dyn CompletionModel>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        let mut extractors: HashMap<&'static str, Box<dyn ArticleExtractor>> = HashMap::new();
        extractors.insert(
            "jamaica-gleaner.com",
            Box::new(FallbackExtractor::new(
                "gleaner",
                vec![
                    Box::new(GleanerHybridExtractor::new()),
                    Box::new(GleanerLegacyExtractor::new()),
                ],
            )),
        );
        extractors.insert(
            "gleaner.newspaperarchive.com",
            Box::new(GleanerArchiveExtractor::new(model)),
        );

        Ok(Self { client, extractors })
    }

    pub fn supported_domains(&self) -> Vec<&'static str> {
        let mut domains: Vec<_> = self.extractors.keys().copied().collect();
        domains.sort_unstable();
        domains
    }

    /// Fetch the page at `url` and run the extractor registered for its host.
    pub async fn extract_article_content(&self, url: &str) -> Result<ArticleContent> {
        let extractor = self.extractor_for(url)?;
        info!("📰 Extracting via {} from {}", extractor.name(), url);
        let html = self.fetch_html(url).await?;
        extractor.extract(&html, url).await
    }

    /// Extract from already-fetched markup, routing by the URL's host.
    pub async fn extract_from_html(&self, html: &str, url: &str) -> Result<ArticleContent> {
        self.extractor_for(url)?.extract(html, url).await
    }

    fn extractor_for(&self, url: &str) -> Result<&dyn ArticleExtractor> {
        let domain = normalize_domain(url)?;
        match self.extractors.get(domain.as_str()) {
            Some(extractor) => Ok(extractor.as_ref()),
            None => Err(Error::UnsupportedDomain {
                domain,
                supported: self.supported_domains().join(", "),
            }),
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Normalize a URL's hostname: lowercase, leading `www.` stripped.
pub fn normalize_domain(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(format!("URL must include a host: {}", trimmed)))?
        .to_lowercase();

    Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
}
