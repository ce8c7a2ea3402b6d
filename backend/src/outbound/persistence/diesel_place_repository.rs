//! PostgreSQL-backed `PlaceRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::place::{Place, PlaceDraft};
use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::PlaceRow;
use super::pool::DbPool;
use super::schema::places;

/// Diesel adapter for the place catalogue.
#[derive(Clone)]
pub struct DieselPlaceRepository {
    pool: DbPool,
}

impl DieselPlaceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_place(row: PlaceRow) -> Result<Place, PlaceRepositoryError> {
    let id = row.id.clone();
    Place::try_from(PlaceDraft {
        id: row.id,
        name: row.name,
        lat: row.lat,
        lng: row.lng,
        discount_description: row.discount_description,
        categories: row.category,
        avg_rating: row.avg_rating,
        address: row.address,
    })
    .map_err(|err| PlaceRepositoryError::invalid_row(format!("place {id}: {err}")))
}

#[async_trait]
impl PlaceRepository for DieselPlaceRepository {
    async fn list_all(&self) -> Result<Vec<Place>, PlaceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PlaceRepositoryError::connection))?;
        let rows: Vec<PlaceRow> = places::table
            .select(PlaceRow::as_select())
            .order_by(places::seq.asc())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    PlaceRepositoryError::query,
                    PlaceRepositoryError::connection,
                )
            })?;
        rows.into_iter().map(row_to_place).collect()
    }
}
