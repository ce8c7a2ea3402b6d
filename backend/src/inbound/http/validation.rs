//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::campus::CampusId;
use crate::domain::{Error, GeoPoint, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidCoordinate,
    IncompleteCoordinate,
    InvalidSort,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidCoordinate => "invalid_coordinate",
            ErrorCode::IncompleteCoordinate => "incomplete_coordinate",
            ErrorCode::InvalidSort => "invalid_sort",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn field_error(
    field: FieldName,
    code: ErrorCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Trimmed, non-empty text or `None`.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn parse_user_id(
    value: &str,
    field: FieldName,
    message: &str,
) -> Result<UserId, Error> {
    UserId::new(value.trim()).map_err(|_| field_error(field, ErrorCode::InvalidUuid, message))
}

/// Combine a latitude/longitude query pair. Both or neither must be given.
pub(crate) fn coordinate_pair(
    lat: Option<f64>,
    lng: Option<f64>,
    fields: (FieldName, FieldName),
) -> Result<Option<GeoPoint>, Error> {
    let (lat_field, lng_field) = fields;
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => GeoPoint::new(lat, lng).map(Some).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": [lat_field.as_str(), lng_field.as_str()],
                "code": ErrorCode::InvalidCoordinate.as_str(),
            }))
        }),
        (Some(_), None) => Err(field_error(
            lng_field,
            ErrorCode::IncompleteCoordinate,
            format!("{} requires {}", lat_field.as_str(), lng_field.as_str()),
        )),
        (None, Some(_)) => Err(field_error(
            lat_field,
            ErrorCode::IncompleteCoordinate,
            format!("{} requires {}", lng_field.as_str(), lat_field.as_str()),
        )),
    }
}

/// Split a comma-separated campus list, dropping blanks and duplicates.
pub(crate) fn campus_list(raw: Option<&str>) -> Vec<CampusId> {
    let mut ids: Vec<CampusId> = Vec::new();
    for part in raw.unwrap_or_default().split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = CampusId::new(part);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LAT: FieldName = FieldName::new("lat");
    const LNG: FieldName = FieldName::new("lng");

    #[rstest]
    fn coordinates_are_optional_as_a_pair() {
        assert_eq!(coordinate_pair(None, None, (LAT, LNG)).expect("ok"), None);
        let point = coordinate_pair(Some(41.87), Some(-87.65), (LAT, LNG))
            .expect("ok")
            .expect("point");
        assert_eq!(point.lat(), 41.87);
    }

    #[rstest]
    #[case(Some(41.87), None, "lng")]
    #[case(None, Some(-87.65), "lat")]
    fn half_a_coordinate_is_rejected(
        #[case] lat: Option<f64>,
        #[case] lng: Option<f64>,
        #[case] field: &str,
    ) {
        let err = coordinate_pair(lat, lng, (LAT, LNG)).expect_err("incomplete");
        let details = err.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], "incomplete_coordinate");
    }

    #[rstest]
    fn out_of_range_coordinates_are_rejected() {
        let err = coordinate_pair(Some(123.0), Some(0.0), (LAT, LNG)).expect_err("range");
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_coordinate"))
        );
    }

    #[rstest]
    #[case(None, &[])]
    #[case(Some(""), &[])]
    #[case(Some("uic"), &["uic"])]
    #[case(Some(" uic , ,depaul-loop,uic"), &["uic", "depaul-loop"])]
    fn campus_lists_are_split_and_deduplicated(
        #[case] raw: Option<&str>,
        #[case] expected: &[&str],
    ) {
        let ids: Vec<String> = campus_list(raw)
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn blank_values_are_not_present() {
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some(" 123456 ")), Some("123456"));
        assert_eq!(present(None), None);
    }
}
