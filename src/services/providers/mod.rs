/// Language-model provider abstraction
///
/// The recommend flow only needs the raw text of a model reply; repairing it
/// into ideas happens in [`crate::services::normalize`]. Keeping the trait this
/// narrow lets tests and alternative backends plug in without touching the
/// normalization or fallback logic.
use crate::{error::AppResult, models::Filters};

pub mod openai;

pub use openai::OpenAiProvider;

/// Trait for idea generators backed by a language model
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IdeaGenerator: Send + Sync {
    /// Asks the model for five ideas matching `filters`
    ///
    /// Returns the reply text as-is. An empty reply is an error.
    async fn generate(&self, filters: &Filters) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
