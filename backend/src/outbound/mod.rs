//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **identity**: the hosted auth service over HTTP
//!
//! Adapters translate between domain types and wire or row formats. They
//! contain no business logic.

pub mod identity;
pub mod persistence;
