use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not extract {field} from article: {url}")]
    MissingField { field: &'static str, url: String },

    #[error("all extraction strategies failed for {url}: [{reasons}]")]
    CombinedExtraction { url: String, reasons: String },

    #[error("invalid article content: {0}")]
    Validation(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported domain: {domain}. Supported domains: {supported}")]
    UnsupportedDomain { domain: String, supported: String },

    #[error("inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
