use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod auth;
mod error;
mod nhl;
mod users;
mod weather;
mod widgets;

pub use error::ApiError;

/// Builds the full HTTP surface over a composed [`AppState`].
pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = Router::new()
        .route("/me", get(users::me))
        .route("/widgets", post(widgets::create_widget))
        .route("/weather", get(weather::get_weather))
        .route("/nhl/teams", get(nhl::get_teams))
        .route("/nhl/roster/{team_code}", get(nhl::get_roster))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/register", post(auth::register))
        .route(
            "/login",
            post(auth::login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::login_rate_limit,
            )),
        )
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(health))
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "API is working!"
}
