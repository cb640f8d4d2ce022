pub mod models;

pub use models::{
    create_model, CompletionConfig, CompletionModel, CompletionRequest, DummyModel, OpenAiModel,
    NOT_FOUND_SENTINEL,
};
