use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;

use super::ApiError;
use crate::models::nhl::{GroupedRoster, TeamSummary};
use crate::state::AppState;

#[derive(Serialize)]
pub struct TeamsResponse {
    #[serde(rename = "nhlTeams")]
    pub nhl_teams: Vec<TeamSummary>,
}

#[derive(Serialize)]
pub struct RosterResponse {
    pub players: GroupedRoster,
}

/// GET /api/nhl/teams
/// Current league standings mapped to the dashboard shape. Fetched from
/// upstream at most once per process; concurrent first callers share the
/// in-flight fetch.
pub async fn get_teams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TeamsResponse>, ApiError> {
    let nhl = state.nhl().clone();

    let teams = state
        .reference()
        .standings_or_fetch(async move {
            let feed = nhl.standings_now().await?;
            Ok(feed
                .standings
                .into_iter()
                .map(TeamSummary::from)
                .collect())
        })
        .await
        .map_err(|e| ApiError::upstream(&e, "Failed to fetch NHL standings"))?;

    Ok(Json(TeamsResponse {
        nhl_teams: (*teams).clone(),
    }))
}

/// GET /api/nhl/roster/{team_code}
/// Position-grouped, stat-enriched roster. A team code already in the cache
/// is served without touching upstream.
pub async fn get_roster(
    State(state): State<Arc<AppState>>,
    Path(team_code): Path<String>,
) -> Result<Json<RosterResponse>, ApiError> {
    let roster = state
        .reference()
        .roster_or_fetch(&team_code, state.roster_service().assemble(&team_code))
        .await
        .map_err(|e| ApiError::upstream(&e, "Failed to fetch NHL roster"))?;

    Ok(Json(RosterResponse {
        players: (*roster).clone(),
    }))
}
