//! Search and list-view handlers.
//!
//! ```text
//! GET /api/v1/search?q=pizza&lat=41.87&lng=-87.65
//! GET /api/v1/campuses?q=hwc
//! GET /api/v1/places?category=food&sort=discount&campus=uic,depaul-loop
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::discovery::{
    CampusPickerResponse, DiscoverRequest, DiscoverResponse, SearchRequest, SearchResponse,
};
use crate::domain::search::DiscoverSort;
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, FieldName, campus_list, coordinate_pair, field_error, present,
};

/// Query string of `GET /api/v1/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Live query; blank returns no results.
    #[serde(default)]
    pub q: String,
    /// Device latitude, if location permission was granted.
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Centre of the campus the map is showing.
    pub campus_lat: Option<f64>,
    pub campus_lng: Option<f64>,
    pub campus_name: Option<String>,
}

impl SearchParams {
    fn into_request(self) -> Result<SearchRequest, Error> {
        let user_location =
            coordinate_pair(self.lat, self.lng, (FieldName::new("lat"), FieldName::new("lng")))?;
        let campus_centre = coordinate_pair(
            self.campus_lat,
            self.campus_lng,
            (FieldName::new("campusLat"), FieldName::new("campusLng")),
        )?;
        Ok(SearchRequest {
            query: self.q,
            user_location,
            campus_centre,
            campus_name: present(self.campus_name.as_deref()).map(str::to_owned),
        })
    }
}

/// Ranked campus and place matches for the search dropdown.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Ranked matches", body = SearchResponse),
        (status = 400, description = "Invalid coordinates", body = Error),
        (status = 503, description = "Place catalogue unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["discovery"],
    operation_id = "search",
    security([])
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchResponse>> {
    let request = params.into_inner().into_request()?;
    let response = state.discovery.search(&request).await?;
    Ok(web::Json(response))
}

/// Query string of `GET /api/v1/campuses`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampusParams {
    /// Name, university or alias fragment; blank returns no campuses.
    #[serde(default)]
    pub q: String,
}

/// Campus picker matches, uncapped and in directory order.
#[utoipa::path(
    get,
    path = "/api/v1/campuses",
    params(CampusParams),
    responses(
        (status = 200, description = "Matching campuses", body = CampusPickerResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["discovery"],
    operation_id = "searchCampuses",
    security([])
)]
#[get("/campuses")]
pub async fn search_campuses(
    state: web::Data<HttpState>,
    params: web::Query<CampusParams>,
) -> ApiResult<web::Json<CampusPickerResponse>> {
    let response = state.discovery.campuses(&params.q).await?;
    Ok(web::Json(response))
}

/// Query string of `GET /api/v1/places`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlacesParams {
    /// Category name, or `all`.
    pub category: Option<String>,
    /// Free text matched against name, discount, categories and address.
    pub q: Option<String>,
    /// `distance`, `discount` or `alpha`.
    pub sort: Option<String>,
    /// Comma-separated campus ids.
    pub campus: Option<String>,
}

impl PlacesParams {
    fn into_request(self) -> Result<DiscoverRequest, Error> {
        let sort = present(self.sort.as_deref())
            .map(|raw| {
                raw.parse::<DiscoverSort>().map_err(|err| {
                    field_error(FieldName::new("sort"), ErrorCode::InvalidSort, err.to_string())
                })
            })
            .transpose()?;
        Ok(DiscoverRequest {
            category: self.category.unwrap_or_default(),
            text: self.q.unwrap_or_default().trim().to_owned(),
            sort,
            campuses: campus_list(self.campus.as_deref()),
        })
    }
}

/// Places for the map markers, ordered for the list view.
#[utoipa::path(
    get,
    path = "/api/v1/places",
    params(PlacesParams),
    responses(
        (status = 200, description = "Filtered places", body = DiscoverResponse),
        (status = 400, description = "Unknown campus or sort order", body = Error),
        (status = 503, description = "Place catalogue unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["discovery"],
    operation_id = "listPlaces",
    security([])
)]
#[get("/places")]
pub async fn list_places(
    state: web::Data<HttpState>,
    params: web::Query<PlacesParams>,
) -> ApiResult<web::Json<DiscoverResponse>> {
    let request = params.into_inner().into_request()?;
    let response = state.discovery.discover(&request).await?;
    Ok(web::Json(response))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
