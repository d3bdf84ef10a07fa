use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::skills::suggest;

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<&'static str>,
}

/// GET /api/v1/skills/suggest?q=
pub async fn handle_suggest(Query(params): Query<SuggestQuery>) -> Json<SuggestResponse> {
    Json(SuggestResponse {
        suggestions: suggest(&params.q),
    })
}
