use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub const SCHEMA_VERSION: i64 = 1;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (users, subscriptions)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                username    TEXT NOT NULL UNIQUE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- One row per ordered pair; the primary key is what makes
            -- concurrent duplicate requests fail.
            CREATE TABLE subscriptions (
                subscriber_id     INTEGER NOT NULL REFERENCES users(id),
                subscribed_to_id  INTEGER NOT NULL REFERENCES users(id),
                is_confirmed      INTEGER NOT NULL DEFAULT 0,
                created_at        TEXT NOT NULL DEFAULT (datetime('now')),
                confirmed_at      TEXT,
                PRIMARY KEY (subscriber_id, subscribed_to_id)
            );

            CREATE INDEX idx_subscriptions_target
                ON subscriptions(subscribed_to_id);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete (schema v{})", SCHEMA_VERSION);
    Ok(())
}
