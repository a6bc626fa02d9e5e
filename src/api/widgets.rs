use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::ApiError;
use crate::auth::AuthUser;
use crate::models::widget::{Layout, Widget, WidgetType};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateWidgetRequest {
    #[serde(default)]
    pub widget_type: String,

    /// Opaque, shape decided by the widget type's configuration dialog.
    #[serde(default)]
    pub props: serde_json::Value,

    pub pos_x: Option<i32>,
    pub pos_y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// POST /api/widgets
/// Persists a widget for the authenticated user. Layout fields default to a
/// 4x3 tile at the grid origin.
pub async fn create_widget(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateWidgetRequest>,
) -> Result<Json<Widget>, ApiError> {
    let widget_type = WidgetType::parse(&payload.widget_type)
        .ok_or_else(|| ApiError::validation("Unknown widget type"))?;

    let defaults = Layout::default();
    let layout = Layout {
        x: payload.pos_x.unwrap_or(defaults.x),
        y: payload.pos_y.unwrap_or(defaults.y),
        w: payload.width.unwrap_or(defaults.w),
        h: payload.height.unwrap_or(defaults.h),
    };

    let widget = state
        .store()
        .create_widget(auth.id, widget_type, payload.props, layout)
        .await?;

    tracing::info!(user_id = auth.id, widget_id = widget.id, "saved widget");

    Ok(Json(widget))
}
