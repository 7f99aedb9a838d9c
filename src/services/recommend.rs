use crate::{
    error::AppResult,
    models::{Filters, Recommendation},
    services::{curated::CuratedDataset, normalize, providers::IdeaGenerator},
};

/// Status used when the model did not supply its own summary
pub const READY_MESSAGE: &str = "추천 5개가 준비됐어요.";

/// Where a recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Model,
    Curated,
}

/// Produces five ideas for the filters.
///
/// Model failures of any kind (transport, status, empty or unusable reply)
/// never reach the caller: the curated dataset answers instead.
pub async fn recommend(
    generator: &dyn IdeaGenerator,
    dataset: &CuratedDataset,
    filters: &Filters,
) -> (Recommendation, Source) {
    match generate_ideas(generator, filters).await {
        Ok(mut recommendation) => {
            if recommendation.status_message.is_none() {
                recommendation.status_message = Some(READY_MESSAGE.to_string());
            }
            (recommendation, Source::Model)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                provider = generator.name(),
                "Model recommendation failed, serving curated ideas"
            );
            let mut rng = rand::thread_rng();
            (dataset.fallback(filters, &mut rng), Source::Curated)
        }
    }
}

/// Asks the model and repairs its reply
pub async fn generate_ideas(
    generator: &dyn IdeaGenerator,
    filters: &Filters,
) -> AppResult<Recommendation> {
    let text = generator.generate(filters).await?;
    normalize::parse_model_output(&text)
}
