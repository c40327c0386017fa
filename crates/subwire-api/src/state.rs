use std::sync::Arc;

use subwire_db::Database;
use subwire_gateway::{Registry, ReplacePolicy};

use crate::directory::Directory;
use crate::ledger::Ledger;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub directory: Directory,
    pub ledger: Ledger,
    pub registry: Registry,
    pub replace_policy: ReplacePolicy,
}

impl AppStateInner {
    pub fn new(db: Database, registry: Registry, replace_policy: ReplacePolicy) -> AppState {
        let db = Arc::new(db);
        let directory = Directory::new(db.clone());
        let ledger = Ledger::new(db, directory.clone(), registry.clone());

        Arc::new(Self {
            directory,
            ledger,
            registry,
            replace_policy,
        })
    }
}
