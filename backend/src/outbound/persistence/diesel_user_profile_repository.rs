//! PostgreSQL-backed `UserProfileRepository`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{
    CampusId, DisplayName, OnboardingSelections, UserId, UserProfile, Username,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, SelectionsUpdate, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel adapter for student profiles.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> UserProfileRepositoryError {
    map_pool_error(error, UserProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: UserRow) -> UserProfile {
    // Names written before the length limit existed are dropped, not fatal.
    let display_name = row.display_name.and_then(|name| match DisplayName::new(name) {
        Ok(name) => Some(name),
        Err(error) => {
            warn!(user_id = %row.id, %error, "ignoring stored display name");
            None
        }
    });
    UserProfile::restore(
        UserId::from_uuid(row.id),
        display_name,
        Username::from_stored(row.username),
        row.edu_verified,
        OnboardingSelections {
            campuses: row.selected_campuses.into_iter().map(CampusId::new).collect(),
            categories: row.selected_categories,
        },
    )
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_profile))
    }

    async fn create(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *profile.id().as_uuid(),
            display_name: profile.display_name().map(AsRef::as_ref),
            username: profile.username().as_ref(),
            edu_verified: profile.edu_verified(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn save_selections(
        &self,
        id: &UserId,
        selections: &OnboardingSelections,
    ) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let campuses: Vec<String> = selections
            .campuses
            .iter()
            .map(|campus| campus.as_str().to_owned())
            .collect();
        let update = SelectionsUpdate {
            selected_campuses: &campuses,
            selected_categories: &selections.categories,
            updated_at: Utc::now(),
        };
        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(UserProfileRepositoryError::query("profile not found"));
        }
        Ok(())
    }

    async fn mark_edu_verified(&self, id: &UserId) -> Result<bool, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set((
                users::edu_verified.eq(true),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }
}
