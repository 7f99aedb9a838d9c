use std::collections::HashSet;
use std::path::Path;

use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{Filters, Idea, Recommendation},
    services::{
        matching::{filter_ideas, pick_random},
        normalize::MAX_IDEAS,
    },
};

const BUNDLED_IDEAS: &str = include_str!("../../data/ideas.json");

/// Status shown when the curated data has nothing for the filters either
pub const FALLBACK_DEFAULT_MESSAGE: &str = "AI 연결에 문제가 있어 기본 추천을 보여드려요.";

/// Status shown when curated matches stand in for the model
pub const FALLBACK_MATCHED_MESSAGE: &str = "AI 연결에 문제가 있어 기존 추천을 보여드려요.";

/// Hand-picked ideas used when the model is unavailable
#[derive(Debug, Clone)]
pub struct CuratedDataset {
    ideas: Vec<Idea>,
}

impl CuratedDataset {
    /// The dataset compiled into the binary
    pub fn bundled() -> AppResult<Self> {
        Self::from_json(BUNDLED_IDEAS)
    }

    /// Loads the dataset from `path`, or the bundled one when no path is given
    pub async fn load(path: Option<&str>) -> AppResult<Self> {
        let Some(path) = path else {
            return Self::bundled();
        };

        let text = tokio::fs::read_to_string(Path::new(path))
            .await
            .map_err(|e| AppError::Dataset(format!("failed to read {}: {}", path, e)))?;
        let dataset = Self::from_json(&text)?;

        tracing::info!(path = %path, ideas = dataset.len(), "Curated dataset loaded");
        Ok(dataset)
    }

    pub fn from_json(text: &str) -> AppResult<Self> {
        let ideas: Vec<Idea> = serde_json::from_str(text)
            .map_err(|e| AppError::Dataset(format!("invalid ideas file: {}", e)))?;
        Self::new(ideas)
    }

    pub fn new(ideas: Vec<Idea>) -> AppResult<Self> {
        if ideas.is_empty() {
            return Err(AppError::Dataset("dataset has no ideas".to_string()));
        }

        let mut seen = HashSet::new();
        for idea in &ideas {
            let fields = [
                ("id", &idea.id),
                ("title", &idea.title),
                ("description", &idea.description),
                ("time", &idea.time),
                ("budget", &idea.budget),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
                return Err(AppError::Dataset(format!(
                    "idea {:?} has an empty {}",
                    idea.id, name
                )));
            }
            if !seen.insert(idea.id.as_str()) {
                tracing::warn!(id = %idea.id, "Duplicate idea id in curated dataset");
            }
        }

        Ok(Self { ideas })
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// All curated ideas compatible with the filters, in dataset order
    pub fn matching(&self, filters: &Filters) -> Vec<Idea> {
        filter_ideas(&self.ideas, filters)
    }

    /// Builds the response served when the model cannot be used.
    ///
    /// Matches are shuffled before truncation. With no matches the first
    /// ideas of the dataset are returned so the caller never gets an empty list.
    pub fn fallback<R: Rng + ?Sized>(&self, filters: &Filters, rng: &mut R) -> Recommendation {
        let matched = self.matching(filters);

        if matched.is_empty() {
            return Recommendation {
                ideas: self.ideas.iter().take(MAX_IDEAS).cloned().collect(),
                status_message: Some(FALLBACK_DEFAULT_MESSAGE.to_string()),
            };
        }

        Recommendation {
            ideas: pick_random(&matched, MAX_IDEAS, rng),
            status_message: Some(FALLBACK_MATCHED_MESSAGE.to_string()),
        }
    }
}
