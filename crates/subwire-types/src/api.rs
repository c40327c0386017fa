use serde::{Deserialize, Serialize};

use crate::models::Subscription;

// -- Envelopes --

/// List responses are wrapped as `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

// -- Users --

#[derive(Debug, Deserialize)]
pub struct CreateUserQuery {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub username: String,
}

// -- Subscriptions --

/// Unknown keys are ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub subscriber_username: String,
    pub subscribe_to_username: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmSubscriptionQuery {
    pub subscriber_id: i64,
    pub subscribed_to_id: i64,
}

/// Read-only view of one user's relations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserSubscriptions {
    /// Rows where the user is the subscriber.
    pub subscribed_to: Vec<Subscription>,
    /// Rows where the user is the target.
    pub subscribers: Vec<Subscription>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub online: usize,
}
