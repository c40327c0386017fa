use std::sync::Arc;

use tracing::info;

use subwire_db::Database;
use subwire_types::models::User;

use crate::blocking::run_blocking;
use crate::error::ServiceError;

/// Registered users. Usernames are unique and never change.
#[derive(Clone)]
pub struct Directory {
    db: Arc<Database>,
}

impl Directory {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        let rows = run_blocking(&self.db, |db| db.list_users()).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn create_user(&self, username: &str) -> Result<User, ServiceError> {
        let name = username.to_owned();
        let row = run_blocking(&self.db, move |db| db.create_user(&name))
            .await?
            .ok_or(ServiceError::DuplicateUsername)?;

        info!("Registered user {} ({})", row.username, row.id);
        Ok(row.into())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let name = username.to_owned();
        let row = run_blocking(&self.db, move |db| db.get_user_by_username(&name)).await?;
        Ok(row.map(User::from))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, ServiceError> {
        let row = run_blocking(&self.db, move |db| db.get_user_by_id(id)).await?;
        Ok(row.map(User::from))
    }
}
