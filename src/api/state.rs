use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        curated::CuratedDataset,
        providers::{IdeaGenerator, OpenAiProvider},
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Model backend; `None` when no API key is configured
    pub generator: Option<Arc<dyn IdeaGenerator>>,
    pub dataset: Arc<CuratedDataset>,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn IdeaGenerator>>, dataset: CuratedDataset) -> Self {
        Self {
            generator,
            dataset: Arc::new(dataset),
        }
    }

    /// Wires the OpenAI provider and curated dataset from configuration
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let dataset = CuratedDataset::load(config.ideas_path.as_deref()).await?;

        let generator = OpenAiProvider::from_config(config)?
            .map(|provider| Arc::new(provider) as Arc<dyn IdeaGenerator>);

        match &generator {
            Some(provider) => tracing::info!(
                provider = provider.name(),
                model = %config.openai_model,
                "Idea generator configured"
            ),
            None => tracing::warn!("OPENAI_API_KEY not set; recommend endpoint will refuse requests"),
        }

        Ok(Self::new(generator, dataset))
    }
}
