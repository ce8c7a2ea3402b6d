//! Keyboard and pointer state for the unified search box.
//!
//! Every event is handled synchronously and produces at most one
//! [`SelectionOutcome`]. The highlighted index always stays within
//! `[0, results.len() - 1]`, or at zero when there are no results.

use serde::Serialize;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::domain::campus::{Campus, CampusId};
use crate::domain::geo::GeoPoint;
use crate::domain::place::{Place, PlaceId};

use super::ranked::{SearchResult, search};

/// Input events understood by [`SearchController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    QueryChanged(String),
    MoveDown,
    MoveUp,
    Confirm,
    Dismiss,
    /// Pointer pressed outside both the input and the result panel.
    FocusLost,
    FocusGained,
    Clear,
    Hover(usize),
}

/// Map view navigation produced by selecting a campus.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampusNavigation {
    campus: CampusId,
    #[serde(flatten)]
    centre: GeoPoint,
    name: String,
}

impl CampusNavigation {
    pub fn for_campus(campus: &Campus) -> Self {
        Self {
            campus: campus.id().clone(),
            centre: campus.location(),
            name: campus.name().to_owned(),
        }
    }

    pub fn campus(&self) -> &CampusId {
        &self.campus
    }

    /// Relative map URL, e.g. `/map?campus=uic&lat=41.8708&lng=-87.6505&name=UIC%20East%20Campus`.
    pub fn href(&self) -> String {
        let name: String = form_urlencoded::byte_serialize(self.name.as_bytes()).collect();
        format!(
            "/map?campus={}&lat={}&lng={}&name={}",
            self.campus,
            self.centre.lat(),
            self.centre.lng(),
            name.replace('+', "%20")
        )
    }
}

/// Result of confirming a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Leave the current view and recentre the map on a campus.
    Navigate(CampusNavigation),
    /// Stay put and focus the place on the map or detail view.
    FocusPlace(PlaceId),
}

impl SelectionOutcome {
    pub fn for_result(result: &SearchResult<'_>) -> Self {
        match result {
            SearchResult::Campus(campus) => Self::Navigate(CampusNavigation::for_campus(campus)),
            SearchResult::Place { place, .. } => Self::FocusPlace(place.id().clone()),
        }
    }
}

/// State machine behind the search dropdown.
///
/// # Examples
/// ```
/// use backend::domain::campus::CampusDirectory;
/// use backend::domain::place::sample_catalogue;
/// use backend::domain::search::controller::{SearchController, SearchEvent, SelectionOutcome};
///
/// let places = sample_catalogue();
/// let mut controller = SearchController::new(CampusDirectory::chicago().all(), &places, None);
/// controller.apply(SearchEvent::QueryChanged("pizza".into()));
/// assert!(controller.is_open());
/// let outcome = controller.apply(SearchEvent::Confirm);
/// assert!(matches!(outcome, Some(SelectionOutcome::FocusPlace(_))));
/// assert_eq!(controller.query(), "Pizano's Pizza");
/// ```
#[derive(Debug, Clone)]
pub struct SearchController<'a> {
    campuses: &'a [Campus],
    places: &'a [Place],
    reference: Option<GeoPoint>,
    query: String,
    open: bool,
    highlighted: usize,
    results: Vec<SearchResult<'a>>,
}

impl<'a> SearchController<'a> {
    pub fn new(campuses: &'a [Campus], places: &'a [Place], reference: Option<GeoPoint>) -> Self {
        Self {
            campuses,
            places,
            reference,
            query: String::new(),
            open: false,
            highlighted: 0,
            results: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn results(&self) -> &[SearchResult<'a>] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<&SearchResult<'a>> {
        self.results.get(self.highlighted)
    }

    /// Apply one event, returning a selection when one was confirmed.
    pub fn apply(&mut self, event: SearchEvent) -> Option<SelectionOutcome> {
        match event {
            SearchEvent::QueryChanged(query) => {
                self.set_query(query);
                self.open = !self.results.is_empty();
            }
            SearchEvent::MoveDown => {
                self.highlighted = (self.highlighted + 1).min(self.last_index());
            }
            SearchEvent::MoveUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            SearchEvent::Hover(index) => {
                self.highlighted = index.min(self.last_index());
            }
            SearchEvent::Confirm => return self.confirm(),
            SearchEvent::Dismiss | SearchEvent::FocusLost => self.open = false,
            SearchEvent::FocusGained => self.open = !self.results.is_empty(),
            SearchEvent::Clear => {
                self.set_query(String::new());
                self.open = false;
            }
        }
        None
    }

    fn confirm(&mut self) -> Option<SelectionOutcome> {
        let selected = self.results.get(self.highlighted)?;
        let outcome = SelectionOutcome::for_result(selected);
        let name = selected.display_name().to_owned();
        self.set_query(name);
        self.open = false;
        Some(outcome)
    }

    fn set_query(&mut self, query: String) {
        self.results = search(&query, self.reference.as_ref(), self.campuses, self.places);
        self.query = query;
        self.highlighted = 0;
    }

    fn last_index(&self) -> usize {
        self.results.len().saturating_sub(1)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
