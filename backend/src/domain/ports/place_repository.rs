//! Port for the discount place catalogue.

use async_trait::async_trait;

use crate::domain::place::{Place, sample_catalogue};

use super::define_port_error;

define_port_error! {
    /// Errors raised by place catalogue adapters.
    pub enum PlaceRepositoryError {
        Connection { message: String } => "place repository connection failed: {message}",
        Query { message: String } => "place repository query failed: {message}",
        /// A stored row could not be turned into a [`Place`].
        InvalidRow { message: String } => "place row is invalid: {message}",
    }
}

/// Read access to the place catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Every listed place, in storage order.
    async fn list_all(&self) -> Result<Vec<Place>, PlaceRepositoryError>;
}

/// Serves the built-in Chicago sample catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlaceRepository;

#[async_trait]
impl PlaceRepository for FixturePlaceRepository {
    async fn list_all(&self) -> Result<Vec<Place>, PlaceRepositoryError> {
        Ok(sample_catalogue())
    }
}
