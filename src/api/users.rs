use axum::{Extension, Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::ApiError;
use crate::auth::AuthUser;
use crate::models::widget::Widget;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MeResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub widgets: Vec<Widget>,
}

/// GET /api/me
/// The authenticated user's profile plus their widgets in saved order.
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state
        .store()
        .get_user_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let widgets = state.store().list_widgets_for_user(auth.id).await?;

    Ok(Json(MeResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        widgets,
    }))
}
