//! Database row types: these map directly to SQLite rows.
//! Distinct from subwire-types API models to keep the DB layer independent.

use subwire_types::models::{Subscription, User};

pub struct UserRow {
    pub id: i64,
    pub username: String,
}

pub struct SubscriptionRow {
    pub subscriber_id: i64,
    pub subscribed_to_id: i64,
    pub is_confirmed: bool,
}

/// Result of flipping a subscription's confirmed flag.
pub enum ConfirmOutcome {
    NotFound,
    AlreadyConfirmed,
    Confirmed(SubscriptionRow),
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            subscriber_id: row.subscriber_id,
            subscribed_to_id: row.subscribed_to_id,
            is_confirmed: row.is_confirmed,
        }
    }
}
