use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{FilterCatalog, Filters, Idea, Recommendation},
    services::{matching, recommend},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Filter options with labels and the default selection
pub async fn get_filters() -> Json<FilterCatalog> {
    Json(FilterCatalog::new())
}

/// Recommends five ideas for the posted filters
///
/// Accepts either `{"filters": {...}}` or the filters object itself.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<Recommendation>> {
    let Some(generator) = state.generator.as_ref() else {
        tracing::error!(request_id = %request_id, "OPENAI_API_KEY is not configured");
        return Err(AppError::MissingApiKey);
    };

    let filters = parse_filters(&body).inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Invalid recommend request");
    })?;

    tracing::info!(
        request_id = %request_id,
        people = %filters.people,
        group = %filters.group,
        age = %filters.age,
        mood = %filters.mood,
        "Processing recommend request"
    );

    let (recommendation, source) =
        recommend::recommend(generator.as_ref(), &state.dataset, &filters).await;

    tracing::info!(
        request_id = %request_id,
        source = ?source,
        ideas = recommendation.ideas.len(),
        "Recommendation completed"
    );

    Ok(Json(recommendation))
}

/// Curated ideas matching the filters, without asking the model
pub async fn list_ideas(
    State(state): State<AppState>,
    query: Result<Query<Filters>, QueryRejection>,
) -> AppResult<Json<Vec<Idea>>> {
    let Query(filters) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    Ok(Json(state.dataset.matching(&filters)))
}

/// One random curated idea matching the filters
pub async fn random_idea(
    State(state): State<AppState>,
    query: Result<Query<Filters>, QueryRejection>,
) -> AppResult<Json<Idea>> {
    let Query(filters) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let matched = state.dataset.matching(&filters);

    let mut rng = rand::thread_rng();
    matching::random_idea(&matched, &mut rng)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("조건에 맞는 추천이 없어요.".to_string()))
}

fn parse_filters(body: &[u8]) -> AppResult<Filters> {
    let mut payload: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let filters = match payload.get_mut("filters").map(Value::take) {
        Some(filters) if !filters.is_null() => filters,
        _ => payload,
    };

    serde_json::from_value(filters).map_err(|e| AppError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupOption, MoodOption};

    #[test]
    fn test_parse_wrapped_filters() {
        let body = r#"{"filters":{"people":"둘","group":"여자단체","age":"30","mood":"창의"}}"#;
        let filters = parse_filters(body.as_bytes()).unwrap();
        assert_eq!(filters.group, GroupOption::Women);
        assert_eq!(filters.mood, MoodOption::Creative);
    }

    #[test]
    fn test_parse_bare_filters() {
        let body = r#"{"people":"둘","group":"남자단체","age":"20","mood":"라이트"}"#;
        assert_eq!(parse_filters(body.as_bytes()).unwrap(), Filters::default());
    }

    #[test]
    fn test_parse_null_filters_uses_payload() {
        let body = r#"{"filters":null,"people":"둘","group":"남자단체","age":"20","mood":"라이트"}"#;
        assert_eq!(parse_filters(body.as_bytes()).unwrap(), Filters::default());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(parse_filters(b"not json").is_err());
        assert!(parse_filters(r#"{"filters":{"people":"둘"}}"#.as_bytes()).is_err());
        let body = r#"{"people":"셋","group":"남자단체","age":"20","mood":"라이트"}"#;
        assert!(matches!(
            parse_filters(body.as_bytes()),
            Err(AppError::InvalidInput(_))
        ));
    }
}
