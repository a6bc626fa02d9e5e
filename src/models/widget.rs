use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::entities::user_widgets;

/// Dashboard tile kinds. The type determines the shape of the props payload
/// by convention only; the server stores props opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Sports,
    Weather,
    Markets,
    News,
}

impl WidgetType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sports => "sports",
            Self::Weather => "weather",
            Self::Markets => "markets",
            Self::News => "news",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sports" => Some(Self::Sports),
            "weather" => Some(Self::Weather),
            "markets" => Some(Self::Markets),
            "news" => Some(Self::News),
            _ => None,
        }
    }
}

/// Layout rectangle in dashboard grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self { x: 0, y: 0, w: 4, h: 3 }
    }
}

/// A widget as the frontend consumes it: flat row reshaped into
/// `{id, type, props, layout}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub id: i32,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub props: serde_json::Value,
    pub layout: Layout,
}

impl TryFrom<user_widgets::Model> for Widget {
    type Error = anyhow::Error;

    fn try_from(row: user_widgets::Model) -> Result<Self, Self::Error> {
        let widget_type = WidgetType::parse(&row.widget_type)
            .ok_or_else(|| anyhow!("unknown widget type in row {}: {}", row.id, row.widget_type))?;

        Ok(Self {
            id: row.id,
            widget_type,
            props: row.props,
            layout: Layout {
                x: row.pos_x,
                y: row.pos_y,
                w: row.width,
                h: row.height,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_type_roundtrips_through_str() {
        for t in [
            WidgetType::Sports,
            WidgetType::Weather,
            WidgetType::Markets,
            WidgetType::News,
        ] {
            assert_eq!(WidgetType::parse(t.as_str()), Some(t));
        }
        assert_eq!(WidgetType::parse("calendar"), None);
        assert_eq!(WidgetType::parse("Weather"), None);
    }

    #[test]
    fn default_layout_matches_dashboard_defaults() {
        assert_eq!(Layout::default(), Layout { x: 0, y: 0, w: 4, h: 3 });
    }

    #[test]
    fn widget_serializes_with_type_and_layout_keys() {
        let widget = Widget {
            id: 7,
            widget_type: WidgetType::Weather,
            props: serde_json::json!({ "city": "Tokyo" }),
            layout: Layout::default(),
        };

        let value = serde_json::to_value(&widget).unwrap();
        assert_eq!(value["type"], "weather");
        assert_eq!(value["props"]["city"], "Tokyo");
        assert_eq!(value["layout"]["w"], 4);
    }
}
