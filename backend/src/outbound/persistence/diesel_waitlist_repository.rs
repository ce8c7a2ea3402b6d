//! PostgreSQL-backed `WaitlistRepository`. Append only.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::WaitlistEntry;
use crate::domain::ports::{WaitlistRepository, WaitlistRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewWaitlistRow;
use super::pool::DbPool;
use super::schema::waitlist;

/// Diesel adapter for waitlist sign-ups.
#[derive(Clone)]
pub struct DieselWaitlistRepository {
    pool: DbPool,
}

impl DieselWaitlistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaitlistRepository for DieselWaitlistRepository {
    async fn append(&self, entry: &WaitlistEntry) -> Result<(), WaitlistRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, WaitlistRepositoryError::connection))?;
        diesel::insert_into(waitlist::table)
            .values(&NewWaitlistRow {
                email: entry.email(),
                kind: entry.kind(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(
                    err,
                    WaitlistRepositoryError::query,
                    WaitlistRepositoryError::connection,
                )
            })
    }
}
