use std::sync::Arc;

use tracing::info;

use subwire_db::Database;
use subwire_db::models::ConfirmOutcome;
use subwire_gateway::Registry;
use subwire_types::api::UserSubscriptions;
use subwire_types::events::Notification;
use subwire_types::models::Subscription;

use crate::blocking::run_blocking;
use crate::directory::Directory;
use crate::error::ServiceError;

/// Outcome of a ledger write, with the human-readable acknowledgement.
#[derive(Debug)]
pub struct Receipt {
    pub subscription: Subscription,
    pub message: String,
}

/// Subscription state machine: `Pending -> Confirmed`, nothing else.
///
/// Pair uniqueness is left to the store's primary key; live notifications
/// go out after the write is committed and never affect the result.
#[derive(Clone)]
pub struct Ledger {
    db: Arc<Database>,
    directory: Directory,
    registry: Registry,
}

impl Ledger {
    pub fn new(db: Arc<Database>, directory: Directory, registry: Registry) -> Self {
        Self {
            db,
            directory,
            registry,
        }
    }

    pub async fn request_subscription(
        &self,
        subscriber_username: &str,
        subscribe_to_username: &str,
    ) -> Result<Receipt, ServiceError> {
        let subscriber = self.directory.find_by_username(subscriber_username).await?;
        let subscribe_to = self.directory.find_by_username(subscribe_to_username).await?;
        let (Some(subscriber), Some(subscribe_to)) = (subscriber, subscribe_to) else {
            return Err(ServiceError::UserNotFound);
        };

        let (subscriber_id, subscribed_to_id) = (subscriber.id, subscribe_to.id);
        let inserted = run_blocking(&self.db, move |db| {
            db.insert_subscription(subscriber_id, subscribed_to_id)
        })
        .await?;
        if !inserted {
            return Err(ServiceError::DuplicateSubscription);
        }

        info!(
            "Subscription requested: {} ({}) -> {} ({})",
            subscriber.username, subscriber_id, subscribe_to.username, subscribed_to_id
        );

        self.registry
            .notify(
                subscribed_to_id,
                Notification::SubscriptionRequested {
                    subscriber_username: subscriber.username.clone(),
                }
                .to_string(),
            )
            .await;

        Ok(Receipt {
            subscription: Subscription::pending(subscriber_id, subscribed_to_id),
            message: format!(
                "Subscription request sent from {} to {}.",
                subscriber.username, subscribe_to.username
            ),
        })
    }

    pub async fn confirm_subscription(
        &self,
        subscriber_id: i64,
        subscribed_to_id: i64,
    ) -> Result<Receipt, ServiceError> {
        let outcome = run_blocking(&self.db, move |db| {
            db.confirm_subscription(subscriber_id, subscribed_to_id)
        })
        .await?;

        let row = match outcome {
            ConfirmOutcome::NotFound => return Err(ServiceError::SubscriptionNotFound),
            ConfirmOutcome::AlreadyConfirmed => return Err(ServiceError::AlreadyConfirmed),
            ConfirmOutcome::Confirmed(row) => row,
        };

        info!("Subscription confirmed: {} -> {}", subscriber_id, subscribed_to_id);

        self.registry
            .notify(subscriber_id, Notification::SubscriptionConfirmed.to_string())
            .await;
        self.registry
            .notify(
                subscribed_to_id,
                Notification::SubscriberConfirmed { subscriber_id }.to_string(),
            )
            .await;

        Ok(Receipt {
            subscription: row.into(),
            message: "Subscription confirmed.".into(),
        })
    }

    /// Read-only view of a user's outgoing and incoming subscriptions.
    pub async fn subscriptions_of(&self, user_id: i64) -> Result<UserSubscriptions, ServiceError> {
        if self.directory.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::UserNotFound);
        }

        let (outgoing, incoming) = run_blocking(&self.db, move |db| {
            Ok((
                db.subscriptions_by_subscriber(user_id)?,
                db.subscriptions_by_target(user_id)?,
            ))
        })
        .await?;

        Ok(UserSubscriptions {
            subscribed_to: outgoing.into_iter().map(Subscription::from).collect(),
            subscribers: incoming.into_iter().map(Subscription::from).collect(),
        })
    }
}
