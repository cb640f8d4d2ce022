pub mod article;
pub mod dates;
pub mod error;

pub use article::ArticleContent;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
