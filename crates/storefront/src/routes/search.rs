//! Search suggestion endpoint for the navbar search box.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Most suggestions returned per query.
const MAX_SUGGESTIONS: usize = 8;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Suggestions response, shaped like `search.json`.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Suggestions containing the query text.
#[instrument(skip(state))]
pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let suggestions = state
        .catalog()
        .suggestions
        .matching(&query.q, MAX_SUGGESTIONS)
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(SuggestResponse { suggestions })
}
