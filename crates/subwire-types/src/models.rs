use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A directed relation between two users. The ordered pair
/// `(subscriber_id, subscribed_to_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber_id: i64,
    pub subscribed_to_id: i64,
    pub is_confirmed: bool,
}

impl Subscription {
    pub fn pending(subscriber_id: i64, subscribed_to_id: i64) -> Self {
        Self {
            subscriber_id,
            subscribed_to_id,
            is_confirmed: false,
        }
    }
}
