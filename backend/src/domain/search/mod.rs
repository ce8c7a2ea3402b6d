//! Campus and place search.
//!
//! - [`text_match`]: substring predicates and their empty-input policies.
//! - [`ranked`]: the capped, ordered live result list.
//! - [`controller`]: dropdown state driven by keyboard and pointer events.
//! - [`discover`]: list view ordering and map filtering.

pub mod controller;
pub mod discover;
pub mod ranked;
pub mod text_match;

pub use controller::{CampusNavigation, SearchController, SearchEvent, SelectionOutcome};
pub use discover::{DiscoverSort, discover};
pub use ranked::{MAX_CAMPUS_RESULTS, MAX_PLACE_RESULTS, SearchResult, place_section_heading, search};
pub use text_match::{CategoryFilter, LiveQuery, PlaceFilter};
