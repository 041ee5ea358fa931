//! Shared request state: the one SQLite connection behind a mutex.

use crate::error::WebError;
use contacts_core::{
    CategoryRepository, CategorySeed, ContactService, RepoResult, ServiceResult,
    SqliteCategoryRepository, SqliteContactRepository,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub type SqliteContactService<'conn> =
    ContactService<SqliteContactRepository<'conn>, SqliteCategoryRepository<'conn>>;

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    clock: Option<fn() -> i64>,
}

impl AppState {
    /// Wraps a migrated connection, seeding categories when the store is empty.
    pub fn initialize(conn: Connection, seed: &CategorySeed) -> RepoResult<Self> {
        SqliteCategoryRepository::try_new(&conn)?.seed_categories(seed)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            clock: None,
        })
    }

    /// Overrides the creation-time source used by every request.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Runs one use-case against a service bound to the locked connection.
    pub(crate) fn with_service<T>(
        &self,
        run: impl FnOnce(&SqliteContactService<'_>) -> ServiceResult<T>,
    ) -> Result<T, WebError> {
        let conn = self.db.lock().map_err(|_| WebError::LockPoisoned)?;
        let mut service = ContactService::new(
            SqliteContactRepository::try_new(&conn)?,
            SqliteCategoryRepository::try_new(&conn)?,
        );
        if let Some(clock) = self.clock {
            service = service.with_clock(clock);
        }
        Ok(run(&service)?)
    }
}
