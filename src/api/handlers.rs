use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::time::Instant;

use crate::data_models::FilterValue;
use crate::errors::SearchError;

use super::AppState;
use super::models::{
    FilterOption, SearchRequest, SearchResponse, SuggestionParams, SuggestionResponse,
};

pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();

    // Only a truly empty query skips the matcher.
    let results = if request.query.is_empty() {
        Vec::new()
    } else {
        state
            .query_engine
            .query(&request.query, request.filter)
            .await
            .map_err(|e| match e {
                SearchError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, e.to_string()),
                SearchError::Transient(_) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
            })?
    };

    let total_results = results.len();
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SearchResponse {
        query: request.query,
        filter: request.filter,
        results,
        total_results,
        processing_time_ms,
    }))
}

pub async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Json<SuggestionResponse> {
    let suggestions = state.suggestions.suggest(&params.q);
    Json(SuggestionResponse {
        query: params.q,
        suggestions,
    })
}

pub async fn filters_handler() -> Json<Vec<FilterOption>> {
    Json(
        FilterValue::OPTIONS
            .iter()
            .map(|(value, label)| FilterOption {
                value: *value,
                label: label.to_string(),
            })
            .collect(),
    )
}
