//! Unified campus and place search.
//!
//! Campuses come first, in directory order, capped at
//! [`MAX_CAMPUS_RESULTS`]. Places follow, sorted by distance from the
//! reference point when one is given and capped at [`MAX_PLACE_RESULTS`].

use crate::domain::campus::Campus;
use crate::domain::geo::{DistanceLabel, DistanceUnit, GeoPoint};
use crate::domain::place::Place;

use super::text_match::LiveQuery;

pub const MAX_CAMPUS_RESULTS: usize = 4;
pub const MAX_PLACE_RESULTS: usize = 5;

/// One entry of the combined result list.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<'a> {
    Campus(&'a Campus),
    Place {
        place: &'a Place,
        /// Miles from the reference point, when one was known.
        distance: Option<f64>,
    },
}

impl SearchResult<'_> {
    /// Text placed in the search box when this result is selected.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Campus(campus) => campus.name(),
            Self::Place { place, .. } => place.name(),
        }
    }

    pub fn distance_miles(&self) -> Option<f64> {
        match self {
            Self::Campus(_) => None,
            Self::Place { distance, .. } => *distance,
        }
    }

    /// Display form of the distance, e.g. `"264ft"` or `"1.4mi"`.
    pub fn distance_label(&self) -> Option<DistanceLabel> {
        self.distance_miles().map(DistanceLabel::from_miles)
    }

    pub fn is_campus(&self) -> bool {
        matches!(self, Self::Campus(_))
    }
}

/// Rank campuses and places for a live query.
///
/// # Examples
/// ```
/// use backend::domain::campus::CampusDirectory;
/// use backend::domain::place::sample_catalogue;
/// use backend::domain::search::ranked::search;
///
/// let places = sample_catalogue();
/// let results = search("pizza", None, CampusDirectory::chicago().all(), &places);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].display_name(), "Pizano's Pizza");
/// ```
pub fn search<'a>(
    query: &str,
    reference: Option<&GeoPoint>,
    campuses: &'a [Campus],
    places: &'a [Place],
) -> Vec<SearchResult<'a>> {
    let Some(query) = LiveQuery::parse(query) else {
        return Vec::new();
    };

    let campus_hits = campuses
        .iter()
        .filter(|campus| query.matches_campus(campus))
        .take(MAX_CAMPUS_RESULTS)
        .map(SearchResult::Campus);

    let mut place_hits: Vec<(&Place, Option<f64>)> = places
        .iter()
        .filter(|place| query.matches_place(place))
        .map(|place| {
            let distance =
                reference.map(|origin| origin.distance_to(&place.location(), DistanceUnit::Miles));
            (place, distance)
        })
        .collect();
    if reference.is_some() {
        // Stable sort keeps source order for equidistant places.
        place_hits.sort_by(|(_, a), (_, b)| a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0)));
    }

    campus_hits
        .chain(
            place_hits
                .into_iter()
                .take(MAX_PLACE_RESULTS)
                .map(|(place, distance)| SearchResult::Place { place, distance }),
        )
        .collect()
}

/// Heading shown above the place section of the result list.
///
/// # Examples
/// ```
/// use backend::domain::search::ranked::place_section_heading;
///
/// assert_eq!(place_section_heading(Some("UIC East Campus"), true), "Near UIC East Campus");
/// assert_eq!(place_section_heading(None, true), "Near you");
/// assert_eq!(place_section_heading(None, false), "Places");
/// ```
pub fn place_section_heading(campus_name: Option<&str>, has_user_location: bool) -> String {
    match campus_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("Near {name}"),
        None if has_user_location => "Near you".to_owned(),
        None => "Places".to_owned(),
    }
}

#[cfg(test)]
#[path = "ranked_tests.rs"]
mod tests;
