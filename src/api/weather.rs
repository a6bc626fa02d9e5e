use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// GET /api/weather?city=...
/// Pure passthrough: the provider's payload is returned verbatim and a
/// provider failure keeps its status code.
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let city = query
        .city
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::validation("City is required"))?;

    let payload = state
        .weather()
        .current(&city)
        .await
        .map_err(|e| ApiError::upstream(&e, "Weather API error"))?;

    Ok(Json(payload))
}
