//! Businesses and venues that offer a student discount.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::geo::{GeoPoint, GeoPointError};

/// Categories a user can pick during onboarding and filter on the map.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "coffee", "drinks", "food", "sushi", "mexican", "museums", "sports", "theater",
];

/// Identifier of a place as assigned by the catalogue store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a stored place row cannot become a [`Place`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceValidationError {
    /// Blank identifier.
    #[error("place id must not be empty")]
    EmptyId,
    /// Blank display name.
    #[error("place name must not be empty")]
    EmptyName,
    /// Rating outside `0..=5`.
    #[error("average rating must be between 0 and 5, got {0}")]
    Rating(f64),
    /// Coordinates out of range.
    #[error(transparent)]
    Location(#[from] GeoPointError),
}

/// Unvalidated place fields, as read from storage.
#[derive(Debug, Clone, Default)]
pub struct PlaceDraft {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub discount_description: String,
    pub categories: Vec<String>,
    pub avg_rating: f64,
    pub address: String,
}

/// A place offering a discount.
///
/// Free-text fields may be empty; empty fields simply never match a search.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Place {
    id: PlaceId,
    name: String,
    #[serde(flatten)]
    location: GeoPoint,
    discount_description: String,
    #[serde(rename = "category")]
    categories: Vec<String>,
    avg_rating: f64,
    address: String,
}

impl TryFrom<PlaceDraft> for Place {
    type Error = PlaceValidationError;

    fn try_from(draft: PlaceDraft) -> Result<Self, Self::Error> {
        if draft.id.trim().is_empty() {
            return Err(PlaceValidationError::EmptyId);
        }
        if draft.name.trim().is_empty() {
            return Err(PlaceValidationError::EmptyName);
        }
        if !(0.0..=5.0).contains(&draft.avg_rating) {
            return Err(PlaceValidationError::Rating(draft.avg_rating));
        }
        Ok(Self {
            id: PlaceId::new(draft.id),
            name: draft.name,
            location: GeoPoint::new(draft.lat, draft.lng)?,
            discount_description: draft.discount_description,
            categories: draft.categories,
            avg_rating: draft.avg_rating,
            address: draft.address,
        })
    }
}

impl Place {
    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn discount_description(&self) -> &str {
        self.discount_description.as_str()
    }

    /// Ordered category tags, e.g. `["food", "coffee"]`.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn avg_rating(&self) -> f64 {
        self.avg_rating
    }

    pub fn address(&self) -> &str {
        self.address.as_str()
    }
}

type Seed = (&'static str, &'static str, f64, f64, &'static str, &'static [&'static str], f64, &'static str);

const SAMPLE_PLACES: &[Seed] = &[
    ("1", "Intelligentsia Coffee", 41.8948, -87.6365, "15% off all drinks", &["coffee"], 4.5, "53 W Jackson Blvd, Chicago"),
    ("2", "Cafecito", 41.8756, -87.6244, "10% off orders", &["food", "coffee"], 4.3, "26 E Congress Pkwy, Chicago"),
    ("3", "Pizano's Pizza", 41.8827, -87.6278, "20% off with student ID", &["food"], 4.4, "61 E Madison St, Chicago"),
    ("4", "Chicago Cultural Center", 41.8836, -87.6249, "Always free for everyone", &["museums"], 4.8, "78 E Washington St, Chicago"),
    ("5", "Museum of Contemporary Art", 41.8970, -87.6211, "Free Tuesdays 5-9pm", &["museums"], 4.6, "220 E Chicago Ave, Chicago"),
    ("6", "National Museum of Mexican Art", 41.8558, -87.6731, "Always free admission", &["museums"], 4.7, "1852 W 19th St, Chicago"),
    ("7", "Art Institute of Chicago", 41.8796, -87.6237, "Free with university student ID", &["museums"], 4.9, "111 S Michigan Ave, Chicago"),
    ("8", "DuSable Black History Museum", 41.7924, -87.6065, "Free every Wednesday", &["museums"], 4.7, "740 E 56th Pl, Chicago"),
    ("9", "Museum of Contemporary Photography", 41.8724, -87.6243, "Always free admission", &["museums"], 4.5, "600 S Michigan Ave, Chicago"),
    ("10", "Hyde Park Art Center", 41.7991, -87.5950, "Always free admission", &["museums"], 4.4, "5020 S Cornell Ave, Chicago"),
    ("11", "Chicago Bulls", 41.8807, -87.6742, "Student tickets from $20 with .edu", &["sports"], 4.6, "1901 W Madison St, Chicago"),
    ("12", "Chicago Blackhawks", 41.8807, -87.6742, "Student rush tickets with .edu", &["sports"], 4.7, "1901 W Madison St, Chicago"),
    ("13", "Chicago Cubs", 41.9484, -87.6553, "Last-minute tickets with .edu email", &["sports"], 4.8, "1060 W Addison St, Chicago"),
    ("14", "Goodman Theatre", 41.8836, -87.6319, "$5 tickets via Teen Arts Pass", &["theater"], 4.7, "170 N Dearborn St, Chicago"),
    ("15", "Lyric Opera of Chicago", 41.8858, -87.6367, "$5 tickets via Teen Arts Pass", &["theater"], 4.8, "20 N Wacker Dr, Chicago"),
];

/// Built-in catalogue served when no database is configured.
pub fn sample_catalogue() -> Vec<Place> {
    SAMPLE_PLACES
        .iter()
        .map(|&(id, name, lat, lng, discount, categories, rating, address)| Place {
            id: PlaceId::new(id),
            name: name.to_owned(),
            location: GeoPoint::trusted(lat, lng),
            discount_description: discount.to_owned(),
            categories: categories.iter().map(|c| (*c).to_owned()).collect(),
            avg_rating: rating,
            address: address.to_owned(),
        })
        .collect()
}
