use crate::Database;
use crate::models::{ConfirmOutcome, SubscriptionRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, Row};

const USER_COLUMNS: &str = "id, username";
const SUBSCRIPTION_COLUMNS: &str = "subscriber_id, subscribed_to_id, is_confirmed";

impl Database {
    // -- Users --

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Insert a user. Returns `None` if the username is already taken; the
    /// UNIQUE constraint decides, so two racing inserts cannot both succeed.
    pub fn create_user(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let inserted = conn.execute("INSERT OR IGNORE INTO users (username) VALUES (?1)", [username])?;
            if inserted == 0 {
                return Ok(None);
            }
            query_user_by_id(conn, conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    // -- Subscriptions --

    /// Insert a pending subscription for the ordered pair.
    /// Returns false if a row for the pair already exists, confirmed or not.
    pub fn insert_subscription(&self, subscriber_id: i64, subscribed_to_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO subscriptions (subscriber_id, subscribed_to_id, is_confirmed)
                 VALUES (?1, ?2, 0)",
                [subscriber_id, subscribed_to_id],
            )?;
            Ok(inserted == 1)
        })
    }

    pub fn get_subscription(
        &self,
        subscriber_id: i64,
        subscribed_to_id: i64,
    ) -> Result<Option<SubscriptionRow>> {
        self.with_conn(|conn| query_subscription(conn, subscriber_id, subscribed_to_id))
    }

    /// Flip the pair's confirmed flag. Only `Pending -> Confirmed` is allowed.
    pub fn confirm_subscription(
        &self,
        subscriber_id: i64,
        subscribed_to_id: i64,
    ) -> Result<ConfirmOutcome> {
        self.with_conn(|conn| {
            let Some(existing) = query_subscription(conn, subscriber_id, subscribed_to_id)? else {
                return Ok(ConfirmOutcome::NotFound);
            };
            if existing.is_confirmed {
                return Ok(ConfirmOutcome::AlreadyConfirmed);
            }

            let updated = conn.execute(
                "UPDATE subscriptions SET is_confirmed = 1, confirmed_at = datetime('now')
                 WHERE subscriber_id = ?1 AND subscribed_to_id = ?2 AND is_confirmed = 0",
                [subscriber_id, subscribed_to_id],
            )?;
            if updated == 0 {
                return Ok(ConfirmOutcome::AlreadyConfirmed);
            }

            match query_subscription(conn, subscriber_id, subscribed_to_id)? {
                Some(row) => Ok(ConfirmOutcome::Confirmed(row)),
                None => Ok(ConfirmOutcome::NotFound),
            }
        })
    }

    /// Rows where `user_id` is the subscriber.
    pub fn subscriptions_by_subscriber(&self, user_id: i64) -> Result<Vec<SubscriptionRow>> {
        self.with_conn(|conn| {
            query_subscriptions(
                conn,
                "WHERE subscriber_id = ?1 ORDER BY subscribed_to_id",
                user_id,
            )
        })
    }

    /// Rows where `user_id` is the target.
    pub fn subscriptions_by_target(&self, user_id: i64) -> Result<Vec<SubscriptionRow>> {
        self.with_conn(|conn| {
            query_subscriptions(
                conn,
                "WHERE subscribed_to_id = ?1 ORDER BY subscriber_id",
                user_id,
            )
        })
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
    })
}

fn subscription_from_row(row: &Row<'_>) -> rusqlite::Result<SubscriptionRow> {
    Ok(SubscriptionRow {
        subscriber_id: row.get(0)?,
        subscribed_to_id: row.get(1)?,
        is_confirmed: row.get(2)?,
    })
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"))?;
    let row = stmt.query_row([username], user_from_row).optional()?;
    Ok(row)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
    let row = stmt.query_row([id], user_from_row).optional()?;
    Ok(row)
}

fn query_subscription(
    conn: &Connection,
    subscriber_id: i64,
    subscribed_to_id: i64,
) -> Result<Option<SubscriptionRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions
         WHERE subscriber_id = ?1 AND subscribed_to_id = ?2"
    ))?;
    let row = stmt
        .query_row([subscriber_id, subscribed_to_id], subscription_from_row)
        .optional()?;
    Ok(row)
}

/// `filter` is the `WHERE ... ORDER BY ...` tail; it binds `?1` to `user_id`.
fn query_subscriptions(conn: &Connection, filter: &str, user_id: i64) -> Result<Vec<SubscriptionRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions {filter}"))?;
    let rows = stmt
        .query_map([user_id], subscription_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
