//! OpenAPI document for the Yapa backend.
//!
//! [`ApiDoc`] collects every handler in [`crate::inbound::http`] together with
//! the domain payloads they exchange. Swagger UI serves it in debug builds.

use crate::domain::geo::ReferenceSource;
use crate::domain::{
    Campus, CampusMatch, CampusPickerResponse, DiscoverResponse, Error, ErrorCode, GeoPoint, OnboardingAction, OnboardingReply,
    OnboardingSelections, OnboardingState, OnboardingStep, Place, SearchHit, SearchResponse,
};
use crate::domain::search::{CampusNavigation, DiscoverSort};
use crate::inbound::http::edu::{EduConfirmResponse, VerifyCodeRequest, VerifyCodeResponse};
use crate::inbound::http::password::PasswordResetRequest;
use crate::inbound::http::waitlist::WaitlistRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by GET /auth/callback after a provider sign-in.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Yapa backend API",
        description = "Student discount discovery: search, onboarding and .edu verification.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::discovery::search,
        crate::inbound::http::discovery::search_campuses,
        crate::inbound::http::discovery::list_places,
        crate::inbound::http::onboarding::get_onboarding,
        crate::inbound::http::onboarding::apply_onboarding_action,
        crate::inbound::http::edu::verify_code,
        crate::inbound::http::edu::confirm_edu,
        crate::inbound::http::auth::auth_callback,
        crate::inbound::http::waitlist::join_waitlist,
        crate::inbound::http::password::reset_password,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Campus,
        CampusMatch,
        CampusPickerResponse,
        CampusNavigation,
        GeoPoint,
        Place,
        ReferenceSource,
        SearchHit,
        SearchResponse,
        DiscoverResponse,
        DiscoverSort,
        OnboardingStep,
        OnboardingState,
        OnboardingAction,
        OnboardingReply,
        OnboardingSelections,
        VerifyCodeRequest,
        VerifyCodeResponse,
        EduConfirmResponse,
        WaitlistRequest,
        PasswordResetRequest,
    )),
    tags(
        (name = "discovery", description = "Search and browse student discounts"),
        (name = "onboarding", description = "First-run campus and category wizard"),
        (name = "auth", description = "Sign-in callbacks and credential changes"),
        (name = "verification", description = "Student email verification by code or link"),
        (name = "waitlist", description = "Launch waitlist sign-ups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema(name: &str) -> RefOr<Schema> {
        let doc = ApiDoc::openapi();
        doc.components
            .expect("components")
            .schemas
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("schema {name} registered"))
    }

    fn assert_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => assert!(
                obj.properties.contains_key(field),
                "schema should have field '{field}'"
            ),
            other => panic!("expected object schema, got {other:?}"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("SearchResponse", "placeHeading")]
    #[case("CampusPickerResponse", "campuses")]
    #[case("OnboardingState", "eduPending")]
    #[case("VerifyCodeRequest", "userId")]
    fn payload_schemas_expose_wire_fields(#[case] name: &str, #[case] field: &str) {
        assert_has_field(&schema(name), field);
    }

    #[rstest]
    #[case("/api/v1/search")]
    #[case("/api/v1/campuses")]
    #[case("/api/v1/places")]
    #[case("/api/v1/onboarding/actions")]
    #[case("/api/v1/edu/verify-code")]
    #[case("/auth/callback")]
    #[case("/auth/edu-confirm")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
