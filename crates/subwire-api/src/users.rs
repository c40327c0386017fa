use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use subwire_types::api::{CreateUserQuery, CreateUserResponse, DataResponse};

use crate::error::ServiceError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /users/
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let users = state.directory.list_users().await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /users/?username=...
pub async fn create_user(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CreateUserQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = state.directory.create_user(&query.username).await?;
    Ok(Json(CreateUserResponse {
        username: user.username,
    }))
}

/// GET /users/{user_id}/subscriptions
pub async fn user_subscriptions(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.ledger.subscriptions_of(user_id).await?;
    Ok(Json(DataResponse { data: view }))
}
