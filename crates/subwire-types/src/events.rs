use std::fmt;

/// Text notifications pushed over a live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Sent to the target of a new subscription request.
    SubscriptionRequested { subscriber_username: String },

    /// Sent to the subscriber once their request is confirmed.
    SubscriptionConfirmed,

    /// Sent to the target once they confirmed a subscriber.
    SubscriberConfirmed { subscriber_id: i64 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubscriptionRequested {
                subscriber_username,
            } => write!(
                f,
                "User {} subscribed to you. Waiting for confirmation.",
                subscriber_username
            ),
            Self::SubscriptionConfirmed => f.write_str("Your subscription has been confirmed."),
            Self::SubscriberConfirmed { subscriber_id } => {
                write!(f, "User {} confirmed your subscription.", subscriber_id)
            }
        }
    }
}
