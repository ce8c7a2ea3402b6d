//! Search and list-view use-cases over the place catalogue.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use super::Error;
use super::campus::{Campus, CampusDirectory, CampusId};
use super::geo::{DistanceLabel, GeoPoint, ReferencePoint, ReferenceSource};
use super::place::Place;
use super::ports::{DiscoveryQuery, PlaceRepository, PlaceRepositoryError};
use super::search::{
    CampusNavigation, DiscoverSort, LiveQuery, PlaceFilter, SearchResult, discover,
    place_section_heading, search,
};

/// Input to the unified search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub user_location: Option<GeoPoint>,
    pub campus_centre: Option<GeoPoint>,
    pub campus_name: Option<String>,
}

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SearchHit {
    Campus {
        campus: Campus,
        /// Map view URL that recentres on this campus.
        href: String,
    },
    Place {
        place: Place,
        #[serde(rename = "distanceMiles")]
        distance_miles: Option<f64>,
        #[serde(rename = "distanceLabel")]
        #[schema(value_type = Option<String>, example = "264ft")]
        distance_label: Option<DistanceLabel>,
    },
}

impl From<SearchResult<'_>> for SearchHit {
    fn from(result: SearchResult<'_>) -> Self {
        match result {
            SearchResult::Campus(campus) => Self::Campus {
                href: CampusNavigation::for_campus(campus).href(),
                campus: campus.clone(),
            },
            SearchResult::Place { place, distance } => Self::Place {
                place: place.clone(),
                distance_miles: distance,
                distance_label: distance.map(DistanceLabel::from_miles),
            },
        }
    }
}

/// Ranked matches plus the origin they were ranked from.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Heading shown above the place section.
    pub place_heading: String,
    pub origin: GeoPoint,
    pub origin_source: ReferenceSource,
    pub results: Vec<SearchHit>,
}

/// A campus picker match with the map view it opens.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampusMatch {
    pub campus: Campus,
    pub href: String,
}

impl From<&Campus> for CampusMatch {
    fn from(campus: &Campus) -> Self {
        Self {
            href: CampusNavigation::for_campus(campus).href(),
            campus: campus.clone(),
        }
    }
}

/// Campus picker matches.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampusPickerResponse {
    pub campuses: Vec<CampusMatch>,
}

/// Input to the map filter and list ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverRequest {
    pub category: String,
    pub text: String,
    /// `None` picks distance when campuses are selected, else alphabetical.
    pub sort: Option<DiscoverSort>,
    pub campuses: Vec<CampusId>,
}

/// Places for the map and list views, and the order applied.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub sort: DiscoverSort,
    pub places: Vec<Place>,
}

/// Serves [`DiscoveryQuery`] from a [`PlaceRepository`] and the static
/// campus directory.
#[derive(Clone)]
pub struct DiscoveryService<R> {
    places: Arc<R>,
    campuses: &'static CampusDirectory,
}

impl<R> DiscoveryService<R> {
    /// Serve discovery from `places` and the given campus directory.
    pub fn new(places: Arc<R>, campuses: &'static CampusDirectory) -> Self {
        Self { places, campuses }
    }
}

fn map_place_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("place catalogue unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } | PlaceRepositoryError::InvalidRow { message } => {
            Error::internal(format!("place catalogue error: {message}"))
        }
    }
}

impl<R> DiscoveryService<R>
where
    R: PlaceRepository,
{
    async fn load_places(&self) -> Result<Vec<Place>, Error> {
        self.places.list_all().await.map_err(map_place_error)
    }

    fn campus_centres(&self, ids: &[CampusId]) -> Result<Vec<GeoPoint>, Error> {
        ids.iter()
            .map(|id| {
                self.campuses
                    .find(id)
                    .map(Campus::location)
                    .ok_or_else(|| Error::invalid_request(format!("unknown campus: {id}")))
            })
            .collect()
    }
}

#[async_trait]
impl<R> DiscoveryQuery for DiscoveryService<R>
where
    R: PlaceRepository,
{
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, Error> {
        let origin = ReferencePoint::resolve(request.user_location, request.campus_centre);
        let place_heading = place_section_heading(
            request.campus_name.as_deref(),
            request.user_location.is_some(),
        );
        let places = self.load_places().await?;
        let point = origin.point();
        let results: Vec<SearchHit> =
            search(&request.query, Some(&point), self.campuses.all(), &places)
                .into_iter()
                .map(SearchHit::from)
                .collect();
        debug!(
            hits = results.len(),
            origin = ?origin.source(),
            "search completed"
        );
        Ok(SearchResponse {
            place_heading,
            origin: point,
            origin_source: origin.source(),
            results,
        })
    }

    async fn campuses(&self, query: &str) -> Result<CampusPickerResponse, Error> {
        let campuses = LiveQuery::parse(query)
            .map(|query| {
                self.campuses
                    .search(&query)
                    .into_iter()
                    .map(CampusMatch::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(CampusPickerResponse { campuses })
    }

    async fn discover(&self, request: &DiscoverRequest) -> Result<DiscoverResponse, Error> {
        let centres = self.campus_centres(&request.campuses)?;
        let sort = request
            .sort
            .unwrap_or_else(|| DiscoverSort::default_for(&centres));
        let filter = PlaceFilter::new(&request.category, &request.text);
        let places = self.load_places().await?;
        let listed = discover(&places, &filter, sort, &centres)
            .into_iter()
            .cloned()
            .collect();
        Ok(DiscoverResponse {
            sort,
            places: listed,
        })
    }
}
