use std::sync::Arc;

use subwire_db::Database;
use tracing::error;

use crate::error::ServiceError;

/// Run a blocking DB call off the async runtime.
pub(crate) async fn run_blocking<F, T>(db: &Arc<Database>, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = db.clone();
    tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ServiceError::Internal(e.into())
        })?
        .map_err(ServiceError::Internal)
}
