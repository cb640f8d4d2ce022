pub mod extractors;
pub mod fallback;
mod recovery;
pub mod service;

pub use extractors::ArticleExtractor;
pub use fallback::FallbackExtractor;
pub use service::ExtractionService;
