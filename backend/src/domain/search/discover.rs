//! List view ordering and map filtering of places.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::geo::{DistanceUnit, GeoPoint};
use crate::domain::place::Place;

use super::text_match::PlaceFilter;

/// Ordering options offered by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverSort {
    /// Nearest to any selected campus first.
    Distance,
    /// Largest leading number in the discount text first.
    Discount,
    /// Name, case-insensitive.
    Alpha,
}

impl DiscoverSort {
    /// Distance when a campus is selected, otherwise alphabetical.
    pub fn default_for(campus_centres: &[GeoPoint]) -> Self {
        if campus_centres.is_empty() {
            Self::Alpha
        } else {
            Self::Distance
        }
    }
}

/// A `sort` value other than `distance`, `discount` or `alpha`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSort(pub String);

impl FromStr for DiscoverSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(Self::Distance),
            "discount" => Ok(Self::Discount),
            "alpha" => Ok(Self::Alpha),
            other => Err(UnknownSort(other.to_owned())),
        }
    }
}

static LEADING_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn leading_number_regex() -> &'static Regex {
    LEADING_NUMBER_RE.get_or_init(|| {
        Regex::new(r"(\d+)")
            .unwrap_or_else(|error| panic!("discount regex failed to compile: {error}"))
    })
}

/// First integer in a discount description, or zero.
///
/// # Examples
/// ```
/// use backend::domain::search::discover::discount_value;
///
/// assert_eq!(discount_value("20% off with student ID"), 20);
/// assert_eq!(discount_value("Always free admission"), 0);
/// ```
pub fn discount_value(description: &str) -> u32 {
    leading_number_regex()
        .captures(description)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Kilometres from `place` to the closest campus centre.
fn nearest_campus_km(place: &Place, campus_centres: &[GeoPoint]) -> f64 {
    campus_centres
        .iter()
        .map(|centre| centre.distance_to(&place.location(), DistanceUnit::Kilometres))
        .fold(f64::INFINITY, f64::min)
}

fn by_name(a: &Place, b: &Place) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}

/// Filter `places` for the map and order them for the list view.
///
/// Distance ordering without any campus centre falls back to alphabetical.
pub fn discover<'a>(
    places: &'a [Place],
    filter: &PlaceFilter,
    sort: DiscoverSort,
    campus_centres: &[GeoPoint],
) -> Vec<&'a Place> {
    let mut listed: Vec<&Place> = places.iter().filter(|place| filter.admits(place)).collect();
    match sort {
        DiscoverSort::Discount => listed.sort_by(|a, b| {
            discount_value(b.discount_description()).cmp(&discount_value(a.discount_description()))
        }),
        DiscoverSort::Distance if !campus_centres.is_empty() => {
            listed.sort_by(|a, b| {
                nearest_campus_km(a, campus_centres).total_cmp(&nearest_campus_km(b, campus_centres))
            });
        }
        DiscoverSort::Distance | DiscoverSort::Alpha => listed.sort_by(|a, b| by_name(a, b)),
    }
    listed
}
