//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, response::Html};

use crate::{
    infrastructure::dto::http::{HealthDto, PresenceDto},
    ui::state::AppState,
};
use lanchat_shared::time::to_rfc3339;

/// The chat page served at `/`
const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Chat page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current presence (count and unique names)
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<PresenceDto> {
    let snapshot = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(PresenceDto {
        count: snapshot.count,
        users: snapshot
            .users
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
        generated_at: to_rfc3339(&state.clock.now()),
    })
}
