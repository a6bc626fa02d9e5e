use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::user_widgets;
use crate::models::widget::{Layout, Widget, WidgetType};

pub struct WidgetRepository {
    conn: DatabaseConnection,
}

impl WidgetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        user_id: i32,
        widget_type: WidgetType,
        props: serde_json::Value,
        layout: Layout,
    ) -> Result<Widget> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = user_widgets::ActiveModel {
            user_id: Set(user_id),
            widget_type: Set(widget_type.as_str().to_string()),
            props: Set(props),
            pos_x: Set(layout.x),
            pos_y: Set(layout.y),
            width: Set(layout.w),
            height: Set(layout.h),
            created_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert widget")?;

        Widget::try_from(model)
    }

    /// Widgets in ascending id order, so the dashboard renders tiles in the
    /// order they were saved.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<Widget>> {
        let rows = user_widgets::Entity::find()
            .filter(user_widgets::Column::UserId.eq(user_id))
            .order_by_asc(user_widgets::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list widgets")?;

        rows.into_iter().map(Widget::try_from).collect()
    }
}
