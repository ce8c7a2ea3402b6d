//! Driving port for campus and place discovery.
//!
//! Inbound adapters call this port to run the unified search or the list
//! view without touching the place catalogue directly.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::discovery::{
    CampusPickerResponse, DiscoverRequest, DiscoverResponse, SearchRequest, SearchResponse,
};

/// Read-only discovery use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryQuery: Send + Sync {
    /// Ranked campus and place matches for a live query.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, Error>;

    /// Campus picker matches on name, university or alias. A blank query
    /// matches nothing.
    async fn campuses(&self, query: &str) -> Result<CampusPickerResponse, Error>;

    /// Filtered and ordered places for the map and list views.
    async fn discover(&self, request: &DiscoverRequest) -> Result<DiscoverResponse, Error>;
}
