use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use subwire_types::api::{ConfirmSubscriptionQuery, MessageResponse, SubscriptionRequest};

use crate::error::ServiceError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub async fn subscribe(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SubscriptionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state
        .ledger
        .request_subscription(&req.subscriber_username, &req.subscribe_to_username)
        .await?;

    Ok(Json(MessageResponse {
        message: receipt.message,
    }))
}

pub async fn confirm_subscription(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ConfirmSubscriptionQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state
        .ledger
        .confirm_subscription(query.subscriber_id, query.subscribed_to_id)
        .await?;

    Ok(Json(MessageResponse {
        message: receipt.message,
    }))
}
