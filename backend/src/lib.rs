//! Yapa backend: student discount discovery over a hexagonal core.

/// OpenAPI document.
pub mod doc;
/// Domain types, services and ports.
pub mod domain;
/// Inbound adapters.
pub mod inbound;
/// Actix middleware.
pub mod middleware;
/// Outbound adapters.
pub mod outbound;
/// Process configuration.
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
