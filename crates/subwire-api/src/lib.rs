mod blocking;
pub mod directory;
pub mod error;
pub mod extract;
pub mod ledger;
pub mod live;
pub mod state;
pub mod subscriptions;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ServiceError;
pub use state::{AppState, AppStateInner};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/", get(users::list_users).post(users::create_user))
        .route("/users/{user_id}/subscriptions", get(users::user_subscriptions))
        .route("/subscribe/", post(subscriptions::subscribe))
        .route("/confirm_subscription/", post(subscriptions::confirm_subscription))
        .route("/ws/{user_id}", get(live::ws_upgrade))
        .route("/health", get(live::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
