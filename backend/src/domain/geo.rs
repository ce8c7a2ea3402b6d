//! Great-circle distance and the reference point used to rank places.
//!
//! Coordinates are WGS-84 degrees. Distances use the haversine formula with a
//! fixed Earth radius chosen by [`DistanceUnit`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;
/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const FEET_PER_MILE: f64 = 5280.0;

/// Fallback origin when neither the user nor a campus provides one.
pub const CITY_CENTRE: GeoPoint = GeoPoint {
    lat: 41.8781,
    lng: -87.6298,
};

/// Validation errors raised when building a [`GeoPoint`] from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoPointError {
    /// Latitude outside `-90..=90` or not finite.
    #[error("latitude must be a finite number between -90 and 90, got {0}")]
    Latitude(f64),
    /// Longitude outside `-180..=180` or not finite.
    #[error("longitude must be a finite number between -180 and 180, got {0}")]
    Longitude(f64),
}

/// A latitude/longitude pair in degrees.
///
/// # Examples
/// ```
/// use backend::domain::geo::GeoPoint;
///
/// let loop_campus = GeoPoint::new(41.8781, -87.6298).expect("valid coordinates");
/// assert_eq!(loop_campus.lat(), 41.8781);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Validate and build a point.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Build a point from compiled-in reference data.
    pub(crate) const fn trusted(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Haversine distance from `self` to `other`.
    pub fn distance_to(&self, other: &GeoPoint, unit: DistanceUnit) -> f64 {
        distance(self, other, unit)
    }
}

/// Unit selected by the Earth radius used in [`distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    /// Statute miles.
    #[default]
    Miles,
    /// Kilometres.
    Kilometres,
}

impl DistanceUnit {
    /// Mean Earth radius expressed in this unit.
    pub const fn earth_radius(self) -> f64 {
        match self {
            Self::Miles => EARTH_RADIUS_MILES,
            Self::Kilometres => EARTH_RADIUS_KM,
        }
    }
}

/// Great-circle distance between two points.
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)
/// d = 2·R·atan2(√a, √(1−a))
/// ```
///
/// # Examples
/// ```
/// use backend::domain::geo::{distance, DistanceUnit, GeoPoint};
///
/// let a = GeoPoint::new(41.8781, -87.6298).expect("valid coordinates");
/// assert_eq!(distance(&a, &a, DistanceUnit::Miles), 0.0);
/// ```
pub fn distance(from: &GeoPoint, to: &GeoPoint, unit: DistanceUnit) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let half_chord = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    unit.earth_radius() * angle
}

/// Human-readable distance: feet below one mile, otherwise miles to one
/// decimal place.
///
/// # Examples
/// ```
/// use backend::domain::geo::DistanceLabel;
///
/// assert_eq!(DistanceLabel::from_miles(0.05).as_str(), "264ft");
/// assert_eq!(DistanceLabel::from_miles(1.42).as_str(), "1.4mi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DistanceLabel(String);

impl DistanceLabel {
    /// Format a distance given in miles.
    pub fn from_miles(miles: f64) -> Self {
        if miles < 1.0 {
            Self(format!("{:.0}ft", (miles * FEET_PER_MILE).round()))
        } else {
            Self(format!("{miles:.1}mi"))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DistanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the ranking origin came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceSource {
    /// The device location sent with the request.
    UserLocation,
    /// The centre of the campus the map is showing.
    Campus,
    /// [`CITY_CENTRE`], used when nothing else is known.
    CityCentre,
}

/// Origin for distance ranking together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    point: GeoPoint,
    source: ReferenceSource,
}

impl ReferencePoint {
    /// Pick the ranking origin: the user's location, else the selected
    /// campus centre, else the city centre.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::geo::{CITY_CENTRE, ReferencePoint, ReferenceSource};
    ///
    /// let origin = ReferencePoint::resolve(None, None);
    /// assert_eq!(origin.point(), CITY_CENTRE);
    /// assert_eq!(origin.source(), ReferenceSource::CityCentre);
    /// ```
    pub fn resolve(user_location: Option<GeoPoint>, campus_centre: Option<GeoPoint>) -> Self {
        match (user_location, campus_centre) {
            (Some(point), _) => Self {
                point,
                source: ReferenceSource::UserLocation,
            },
            (None, Some(point)) => Self {
                point,
                source: ReferenceSource::Campus,
            },
            (None, None) => Self {
                point: CITY_CENTRE,
                source: ReferenceSource::CityCentre,
            },
        }
    }

    /// The resolved origin.
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    /// Which input supplied [`Self::point`].
    pub fn source(&self) -> ReferenceSource {
        self.source
    }
}
