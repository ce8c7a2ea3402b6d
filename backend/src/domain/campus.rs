//! Campus reference data.
//!
//! The directory is compiled in, built once on first use and never mutated.
//! Source order matters: campus search results preserve it.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::geo::GeoPoint;
use super::search::text_match::LiveQuery;

/// Stable slug identifying a campus, e.g. `uic-west`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CampusId(String);

impl CampusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CampusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical site of a university. One university may own several.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    id: CampusId,
    name: String,
    university: String,
    #[serde(flatten)]
    location: GeoPoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_domain: Option<String>,
}

impl Campus {
    pub fn id(&self) -> &CampusId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn university(&self) -> &str {
        self.university.as_str()
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Lowercase alternative spellings used by the campus picker.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// School email domain, e.g. `uic.edu`, when known.
    pub fn email_domain(&self) -> Option<&str> {
        self.email_domain.as_deref()
    }
}

struct CampusSeed {
    id: &'static str,
    name: &'static str,
    university: &'static str,
    lat: f64,
    lng: f64,
    aliases: &'static [&'static str],
    domain: Option<&'static str>,
}

impl From<&CampusSeed> for Campus {
    fn from(seed: &CampusSeed) -> Self {
        Self {
            id: CampusId::new(seed.id),
            name: seed.name.to_owned(),
            university: seed.university.to_owned(),
            location: GeoPoint::trusted(seed.lat, seed.lng),
            aliases: seed.aliases.iter().map(|a| a.to_lowercase()).collect(),
            email_domain: seed.domain.map(str::to_owned),
        }
    }
}

macro_rules! campus {
    ($id:literal, $name:literal, $university:literal, $lat:literal, $lng:literal, [$($alias:literal),*], $domain:expr) => {
        CampusSeed {
            id: $id,
            name: $name,
            university: $university,
            lat: $lat,
            lng: $lng,
            aliases: &[$($alias),*],
            domain: $domain,
        }
    };
}

const CHICAGO_CAMPUSES: &[CampusSeed] = &[
    campus!("depaul-loop", "DePaul Loop Campus", "DePaul University", 41.8781, -87.6278, ["depaul", "dpu"], Some("depaul.edu")),
    campus!("depaul-lincoln-park", "DePaul Lincoln Park Campus", "DePaul University", 41.9245, -87.6553, ["depaul", "dpu"], Some("depaul.edu")),
    campus!("uic", "UIC East Campus", "University of Illinois Chicago", 41.8708, -87.6505, ["uic", "illinois chicago"], Some("uic.edu")),
    campus!("uic-west", "UIC West Campus", "University of Illinois Chicago", 41.8694, -87.6731, ["uic", "medical district"], Some("uic.edu")),
    campus!("uchicago", "University of Chicago", "University of Chicago", 41.7886, -87.5987, ["uchicago", "u of c", "hyde park"], Some("uchicago.edu")),
    campus!("loyola", "Loyola Lake Shore Campus", "Loyola University Chicago", 41.9992, -87.6578, ["luc", "loyola"], Some("luc.edu")),
    campus!("loyola-maywood", "Loyola Health Sciences Campus", "Loyola University Chicago", 41.8589, -87.8342, ["luc", "maywood"], Some("luc.edu")),
    campus!("northwestern", "Northwestern Chicago Campus", "Northwestern University", 41.8963, -87.6194, ["nu", "streeterville"], Some("northwestern.edu")),
    campus!("northwestern-evanston", "Northwestern Evanston Campus", "Northwestern University", 42.0565, -87.6753, ["nu", "evanston"], Some("northwestern.edu")),
    campus!("columbia-college", "Columbia College Chicago", "Columbia College Chicago", 41.8739, -87.6249, ["colum"], Some("colum.edu")),
    campus!("iit", "Illinois Tech Mies Campus", "Illinois Institute of Technology", 41.8349, -87.6270, ["iit", "illinois tech"], Some("iit.edu")),
    campus!("roosevelt", "Roosevelt University Chicago Campus", "Roosevelt University", 41.8762, -87.6247, ["ru"], Some("roosevelt.edu")),
    campus!("saic", "School of the Art Institute", "School of the Art Institute of Chicago", 41.8796, -87.6256, ["saic"], Some("saic.edu")),
    campus!("neiu", "Northeastern Illinois University", "Northeastern Illinois University", 41.9802, -87.7173, ["neiu"], Some("neiu.edu")),
    campus!("chicago-state", "Chicago State University", "Chicago State University", 41.7190, -87.6092, ["csu"], Some("csu.edu")),
    campus!("ccc-harold-washington", "Harold Washington College", "City Colleges of Chicago", 41.8859, -87.6262, ["hwc", "ccc"], Some("ccc.edu")),
    campus!("ccc-daley", "Richard J. Daley College", "City Colleges of Chicago", 41.7590, -87.7380, ["daley", "ccc"], Some("ccc.edu")),
    campus!("ccc-kennedy-king", "Kennedy-King College", "City Colleges of Chicago", 41.7780, -87.6390, ["kkc", "ccc"], Some("ccc.edu")),
    campus!("ccc-malcolm-x", "Malcolm X College", "City Colleges of Chicago", 41.8773, -87.6756, ["mxc", "ccc"], Some("ccc.edu")),
    campus!("ccc-olive-harvey", "Olive-Harvey College", "City Colleges of Chicago", 41.7130, -87.5870, ["ohc", "ccc"], Some("ccc.edu")),
    campus!("ccc-truman", "Harry S Truman College", "City Colleges of Chicago", 41.9640, -87.6590, ["truman", "ccc"], Some("ccc.edu")),
    campus!("ccc-wilbur-wright", "Wilbur Wright College", "City Colleges of Chicago", 41.9570, -87.7870, ["wright", "ccc"], Some("ccc.edu")),
    campus!("north-park", "North Park University", "North Park University", 41.9800, -87.7110, ["npu"], Some("northpark.edu")),
    campus!("rush", "Rush University", "Rush University", 41.8740, -87.6700, ["rush"], Some("rush.edu")),
    campus!("moody", "Moody Bible Institute", "Moody Bible Institute", 41.8980, -87.6330, ["moody"], Some("moody.edu")),
    campus!("national-louis", "National Louis University Chicago Campus", "National Louis University", 41.8775, -87.6260, ["nlu"], Some("nl.edu")),
    campus!("northern-illinois", "Northern Illinois University", "Northern Illinois University", 41.9340, -88.7700, ["niu", "dekalb"], Some("niu.edu")),
    campus!("lewis", "Lewis University", "Lewis University", 41.6050, -88.0800, ["lewis"], Some("lewisu.edu")),
    campus!("college-dupage", "College of DuPage", "College of DuPage", 41.8400, -88.0730, ["cod", "dupage"], Some("cod.edu")),
];

/// Immutable, ordered set of campuses.
#[derive(Debug, Clone, Default)]
pub struct CampusDirectory {
    campuses: Vec<Campus>,
}

impl CampusDirectory {
    pub fn new(campuses: Vec<Campus>) -> Self {
        Self { campuses }
    }

    /// The built-in Chicago-area directory.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::campus::{CampusDirectory, CampusId};
    ///
    /// let uic = CampusDirectory::chicago()
    ///     .find(&CampusId::new("uic"))
    ///     .expect("uic is listed");
    /// assert_eq!(uic.email_domain(), Some("uic.edu"));
    /// ```
    pub fn chicago() -> &'static CampusDirectory {
        static DIRECTORY: OnceLock<CampusDirectory> = OnceLock::new();
        DIRECTORY.get_or_init(|| Self::new(CHICAGO_CAMPUSES.iter().map(Campus::from).collect()))
    }

    pub fn all(&self) -> &[Campus] {
        &self.campuses
    }

    pub fn find(&self, id: &CampusId) -> Option<&Campus> {
        self.campuses.iter().find(|campus| campus.id() == id)
    }

    /// Campus picker matches in directory order, uncapped.
    ///
    /// Unlike the unified search this also consults aliases.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::campus::CampusDirectory;
    /// use backend::domain::search::LiveQuery;
    ///
    /// let query = LiveQuery::parse("hwc").expect("non-empty");
    /// let hits = CampusDirectory::chicago().search(&query);
    /// assert_eq!(hits[0].name(), "Harold Washington College");
    /// ```
    pub fn search(&self, query: &LiveQuery) -> Vec<&Campus> {
        self.campuses
            .iter()
            .filter(|campus| query.matches_campus_or_alias(campus))
            .collect()
    }

    pub fn contains(&self, id: &CampusId) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.campuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let directory = CampusDirectory::chicago();
        let ids: HashSet<_> = directory.all().iter().map(Campus::id).collect();
        assert_eq!(ids.len(), directory.len());
    }

    #[test]
    fn every_campus_has_valid_coordinates() {
        for campus in CampusDirectory::chicago().all() {
            let location = campus.location();
            assert!(
                GeoPoint::new(location.lat(), location.lng()).is_ok(),
                "{} has invalid coordinates",
                campus.id()
            );
        }
    }

    #[test]
    fn picker_search_is_uncapped_and_keeps_directory_order() {
        let directory = CampusDirectory::chicago();
        let query = LiveQuery::parse("ccc").expect("non-empty");
        let ids: Vec<&str> = directory.search(&query).iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids.len(), 7);
        assert_eq!(ids[0], "ccc-harold-washington");
        assert_eq!(ids[6], "ccc-wilbur-wright");
    }

    #[test]
    fn picker_search_matches_university_names() {
        let query = LiveQuery::parse("Loyola University").expect("non-empty");
        let ids: Vec<&str> = CampusDirectory::chicago()
            .search(&query)
            .iter()
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(ids, ["loyola", "loyola-maywood"]);
    }

    #[test]
    fn aliases_are_lowercase() {
        for campus in CampusDirectory::chicago().all() {
            for alias in campus.aliases() {
                assert_eq!(alias, &alias.to_lowercase());
            }
        }
    }

    #[test]
    fn email_domains_end_with_edu() {
        let domains = CampusDirectory::chicago()
            .all()
            .iter()
            .filter_map(Campus::email_domain);
        for domain in domains {
            assert!(domain.ends_with(".edu"), "{domain}");
        }
    }

    #[test]
    fn unknown_id_is_absent() {
        assert!(!CampusDirectory::chicago().contains(&CampusId::new("hogwarts")));
    }

    #[test]
    fn serialises_flattened_coordinates() {
        let campus = CampusDirectory::chicago()
            .find(&CampusId::new("uic-west"))
            .expect("listed");
        let value = serde_json::to_value(campus).expect("serialise");
        assert_eq!(value["id"], "uic-west");
        assert_eq!(value["lat"], 41.8694);
        assert_eq!(value["emailDomain"], "uic.edu");
    }
}
