//! PostgreSQL-backed `EduVerificationRepository`.
//!
//! Consuming a code and flagging the profile happen in one transaction, and
//! the code row is claimed by a conditional `UPDATE` so concurrent or replayed
//! submissions of the same code cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::UserId;
use crate::domain::ports::{
    EduVerificationRepository, EduVerificationRepositoryError, PendingVerification,
};
use crate::domain::verification::CodeDigest;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewVerificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::{edu_verifications, users};

/// Diesel adapter for [`EduVerificationRepository`].
#[derive(Clone)]
pub struct DieselEduVerificationRepository {
    pool: DbPool,
}

impl DieselEduVerificationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> EduVerificationRepositoryError {
    map_pool_error(error, EduVerificationRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> EduVerificationRepositoryError {
    map_diesel_error(
        error,
        EduVerificationRepositoryError::query,
        EduVerificationRepositoryError::connection,
    )
}

#[async_trait]
impl EduVerificationRepository for DieselEduVerificationRepository {
    async fn store(
        &self,
        pending: &PendingVerification,
    ) -> Result<(), EduVerificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewVerificationRow {
            user_id: *pending.user_id.as_uuid(),
            code_digest: pending.code_digest.as_str(),
            verified: false,
            expires_at: pending.expires_at,
        };
        diesel::insert_into(edu_verifications::table)
            .values(&row)
            .on_conflict(edu_verifications::user_id)
            .do_update()
            .set((
                edu_verifications::code_digest.eq(excluded(edu_verifications::code_digest)),
                edu_verifications::verified.eq(false),
                edu_verifications::expires_at.eq(excluded(edu_verifications::expires_at)),
                edu_verifications::created_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn consume(
        &self,
        user_id: &UserId,
        code_digest: &CodeDigest,
        now: DateTime<Utc>,
    ) -> Result<bool, EduVerificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uid = *user_id.as_uuid();
        let digest = code_digest.as_str();

        conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            async move {
                let claimed = diesel::update(
                    edu_verifications::table
                        .filter(edu_verifications::user_id.eq(uid))
                        .filter(edu_verifications::code_digest.eq(digest))
                        .filter(edu_verifications::verified.eq(false))
                        .filter(edu_verifications::expires_at.gt(now)),
                )
                .set(edu_verifications::verified.eq(true))
                .execute(conn)
                .await?;
                if claimed == 0 {
                    return Ok(false);
                }

                diesel::update(users::table.filter(users::id.eq(uid)))
                    .set((users::edu_verified.eq(true), users::updated_at.eq(now)))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }
}
