//! Case-insensitive substring matching over campuses and places.
//!
//! Two call sites deliberately disagree about empty input. A live search with
//! an empty query matches nothing ([`LiveQuery::parse`] yields `None`), while
//! an empty map filter matches everything ([`PlaceFilter`]).

use crate::domain::campus::Campus;
use crate::domain::place::Place;

fn contains(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle)
}

/// Non-empty, lowercased query typed into a live search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveQuery(String);

impl LiveQuery {
    /// `None` for an empty query: live search is suppressed, not "match all".
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Match on campus name or university.
    pub fn matches_campus(&self, campus: &Campus) -> bool {
        contains(campus.name(), &self.0) || contains(campus.university(), &self.0)
    }

    /// Campus picker variant that also consults aliases.
    pub fn matches_campus_or_alias(&self, campus: &Campus) -> bool {
        self.matches_campus(campus) || campus.aliases().iter().any(|a| contains(a, &self.0))
    }

    /// Match on place name, any category, or the discount description.
    pub fn matches_place(&self, place: &Place) -> bool {
        contains(place.name(), &self.0)
            || place.categories().iter().any(|c| contains(c, &self.0))
            || contains(place.discount_description(), &self.0)
    }
}

/// Category part of the map filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Empty input and the literal `all` both mean no restriction.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_lowercase())
        }
    }

    pub fn admits(&self, place: &Place) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => place.categories().iter().any(|c| c == category),
        }
    }
}

/// Map view filter: a category plus optional free text.
///
/// # Examples
/// ```
/// use backend::domain::place::sample_catalogue;
/// use backend::domain::search::text_match::PlaceFilter;
///
/// let places = sample_catalogue();
/// let everything = PlaceFilter::new("all", "");
/// assert!(places.iter().all(|p| everything.admits(p)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceFilter {
    category: CategoryFilter,
    text: Option<String>,
}

impl PlaceFilter {
    pub fn new(category: &str, text: &str) -> Self {
        Self {
            category: CategoryFilter::parse(category),
            text: (!text.is_empty()).then(|| text.to_lowercase()),
        }
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Category must match and the text, if any, must appear in the name,
    /// discount, a category, or the address.
    pub fn admits(&self, place: &Place) -> bool {
        self.category.admits(place) && self.text_admits(place)
    }

    fn text_admits(&self, place: &Place) -> bool {
        let Some(text) = self.text.as_deref() else {
            return true;
        };
        contains(place.name(), text)
            || contains(place.discount_description(), text)
            || place.categories().iter().any(|c| contains(c, text))
            || contains(place.address(), text)
    }
}
