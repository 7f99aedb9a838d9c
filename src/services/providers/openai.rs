/// OpenAI Responses API provider
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::Filters,
    services::{
        prompt::{user_prompt, SYSTEM_PROMPT},
        providers::IdeaGenerator,
    },
};

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    output_text: Option<OutputText>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Option<Vec<ContentChunk>>,
    #[serde(default)]
    output_text: Option<OutputText>,
}

#[derive(Debug, Deserialize)]
struct ContentChunk {
    #[serde(default)]
    text: Option<String>,
}

/// Convenience text some gateways add next to `output` or on an output item
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OutputText {
    Single(String),
    Parts(Vec<String>),
}

impl OutputText {
    fn into_string(self) -> String {
        match self {
            OutputText::Single(text) => text,
            OutputText::Parts(parts) => parts.concat(),
        }
    }
}

impl OutputItem {
    /// Text of the content chunks, or the item's own `output_text` without them
    fn into_text(self) -> String {
        let text: String = self
            .content
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.text)
            .collect();

        if !text.is_empty() {
            return text;
        }
        self.output_text
            .map(OutputText::into_string)
            .unwrap_or_default()
    }
}

impl ResponsesResponse {
    fn into_text(self) -> String {
        let text: String = self.output.into_iter().map(OutputItem::into_text).collect();

        if !text.is_empty() {
            return text;
        }
        self.output_text
            .map(OutputText::into_string)
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            temperature,
        })
    }

    /// Builds a provider from configuration, or `None` when no API key is set
    pub fn from_config(config: &Config) -> AppResult<Option<Self>> {
        let Some(api_key) = config.api_key() else {
            return Ok(None);
        };

        Self::new(
            api_key.to_string(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            config.openai_temperature,
            config.llm_timeout(),
        )
        .map(Some)
    }

    fn build_request(&self, filters: &Filters) -> ResponsesRequest<'_> {
        ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                InputMessage {
                    role: "user",
                    content: user_prompt(filters),
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait::async_trait]
impl IdeaGenerator for OpenAiProvider {
    async fn generate(&self, filters: &Filters) -> AppResult<String> {
        let url = format!("{}/responses", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(filters))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let body: ResponsesResponse = response.json().await?;
        let text = body.into_text();

        if text.trim().is_empty() {
            return Err(AppError::ExternalApi("LLM reply is empty".to_string()));
        }

        tracing::info!(
            model = %self.model,
            chars = text.len(),
            provider = self.name(),
            "Model reply received"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
