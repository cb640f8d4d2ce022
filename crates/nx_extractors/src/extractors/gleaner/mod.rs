//! Extraction strategies for the Jamaica Gleaner source family:
//! the modern site (hybrid JSON-LD + CSS), the legacy site markup
//! (pure CSS), and the scanned newspaper archive (OCR text).

pub mod archive;
pub mod hybrid;
pub mod legacy;

pub use archive::GleanerArchiveExtractor;
pub use hybrid::GleanerHybridExtractor;
pub use legacy::GleanerLegacyExtractor;

/// Trailing reporter signatures end with an address at this domain.
pub(crate) const SIGNATURE_SUFFIX: &str = "@gleanerjm.com";
