//! Ranking behaviour over the built-in directory and synthetic catalogues.

use super::*;
use crate::domain::campus::CampusDirectory;
use crate::domain::geo::CITY_CENTRE;
use crate::domain::place::{PlaceDraft, sample_catalogue};
use rstest::{fixture, rstest};

#[fixture]
fn places() -> Vec<Place> {
    sample_catalogue()
}

fn campuses() -> &'static [Campus] {
    CampusDirectory::chicago().all()
}

/// Many places sharing a keyword at increasing distance from the city centre,
/// listed far-to-near so sorting is observable.
fn coffee_strip(count: usize) -> Vec<Place> {
    (0..count)
        .rev()
        .map(|i| {
            Place::try_from(PlaceDraft {
                id: format!("strip-{i}"),
                name: format!("Coffee Stop {i}"),
                lat: CITY_CENTRE.lat() + 0.01 * i as f64,
                lng: CITY_CENTRE.lng(),
                discount_description: "10% off".into(),
                categories: vec!["coffee".into()],
                avg_rating: 4.0,
                address: String::new(),
            })
            .expect("valid synthetic place")
        })
        .collect()
}

#[rstest]
fn pizza_scenario_returns_single_place(places: Vec<Place>) {
    let results = search("pizza", Some(&CITY_CENTRE), campuses(), &places);
    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0],
        SearchResult::Place { place, .. } if place.name() == "Pizano's Pizza"
    ));
}

#[rstest]
fn empty_query_yields_nothing(places: Vec<Place>) {
    assert!(search("", Some(&CITY_CENTRE), campuses(), &places).is_empty());
    assert!(search("", None, campuses(), &places).is_empty());
}

#[rstest]
#[case("chicago")]
#[case("university")]
#[case("college")]
#[case("free")]
#[case("e")]
fn every_result_contains_the_query(places: Vec<Place>, #[case] query: &str) {
    let needle = query.to_lowercase();
    for result in search(query, Some(&CITY_CENTRE), campuses(), &places) {
        let hit = match result {
            SearchResult::Campus(campus) => {
                campus.name().to_lowercase().contains(&needle)
                    || campus.university().to_lowercase().contains(&needle)
            }
            SearchResult::Place { place, .. } => {
                place.name().to_lowercase().contains(&needle)
                    || place.categories().iter().any(|c| c.contains(&needle))
                    || place.discount_description().to_lowercase().contains(&needle)
            }
        };
        assert!(hit, "{} does not contain {query}", result.display_name());
    }
}

#[rstest]
#[case("e")]
#[case("a")]
#[case("o")]
fn caps_hold_for_broad_queries(places: Vec<Place>, #[case] query: &str) {
    let results = search(query, Some(&CITY_CENTRE), campuses(), &places);
    let campus_count = results.iter().filter(|r| r.is_campus()).count();
    let place_count = results.len() - campus_count;
    assert_eq!(campus_count, MAX_CAMPUS_RESULTS);
    assert_eq!(place_count, MAX_PLACE_RESULTS);
}

#[rstest]
fn campuses_keep_directory_order() {
    let results = search("depaul", None, campuses(), &[]);
    let names: Vec<_> = results.iter().map(SearchResult::display_name).collect();
    assert_eq!(names, ["DePaul Loop Campus", "DePaul Lincoln Park Campus"]);
}

#[rstest]
fn campuses_precede_places_regardless_of_distance(places: Vec<Place>) {
    // "chicago" hits both campuses and places.
    let results = search("chicago", Some(&CITY_CENTRE), campuses(), &places);
    let first_place = results
        .iter()
        .position(|r| !r.is_campus())
        .expect("some places match");
    assert!(first_place > 0);
    assert!(results[first_place..].iter().all(|r| !r.is_campus()));
}

#[rstest]
fn places_are_non_decreasing_in_distance() {
    let strip = coffee_strip(12);
    let results = search("coffee", Some(&CITY_CENTRE), &[], &strip);
    assert_eq!(results.len(), MAX_PLACE_RESULTS);
    let distances: Vec<f64> = results
        .iter()
        .map(|r| r.distance_miles().expect("reference supplied"))
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]), "{distances:?}");
    assert_eq!(results[0].display_name(), "Coffee Stop 0");
}

#[rstest]
fn without_reference_places_keep_source_order() {
    let strip = coffee_strip(3);
    let results = search("coffee", None, &[], &strip);
    let names: Vec<_> = results.iter().map(SearchResult::display_name).collect();
    assert_eq!(names, ["Coffee Stop 2", "Coffee Stop 1", "Coffee Stop 0"]);
    assert!(results.iter().all(|r| r.distance_label().is_none()));
}

#[rstest]
fn place_results_carry_distance_labels(places: Vec<Place>) {
    let results = search("pizza", Some(&CITY_CENTRE), &[], &places);
    let label = results[0].distance_label().expect("reference supplied");
    assert!(label.as_str().ends_with("ft"), "{label}");
}

#[rstest]
#[case(Some("DePaul Loop Campus"), false, "Near DePaul Loop Campus")]
#[case(Some(""), true, "Near you")]
#[case(None, false, "Places")]
fn heading_prefers_campus_then_user(
    #[case] campus: Option<&str>,
    #[case] user: bool,
    #[case] expected: &str,
) {
    assert_eq!(place_section_heading(campus, user), expected);
}
