//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: `models.rs` and `schema.rs` never leave this module.
//! - **Async pooling**: `diesel-async` connections from a `bb8` pool.
//! - **Typed errors**: database failures map onto each port's error enum
//!   without copying database messages.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselPlaceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/yapa")).await?;
//! let places = DieselPlaceRepository::new(pool);
//! ```

mod diesel_edu_verification_repository;
mod diesel_place_repository;
mod diesel_user_profile_repository;
mod diesel_waitlist_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_edu_verification_repository::DieselEduVerificationRepository;
pub use diesel_place_repository::DieselPlaceRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use diesel_waitlist_repository::DieselWaitlistRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
