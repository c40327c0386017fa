use axum::{
    Json,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};

use subwire_gateway::connection;
use subwire_types::api::HealthResponse;

use crate::extract::ApiPath;
use crate::state::AppState;

/// GET /ws/{user_id}: upgrade to the live notification channel.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let registry = state.registry.clone();
    let policy = state.replace_policy;
    ws.on_upgrade(move |socket| connection::handle_connection(socket, registry, user_id, policy))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        online: state.registry.online_count().await,
    })
}
