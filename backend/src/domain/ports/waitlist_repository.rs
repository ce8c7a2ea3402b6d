//! Port for waitlist sign-ups.

use async_trait::async_trait;

use crate::domain::waitlist::WaitlistEntry;

use super::define_port_error;

define_port_error! {
    /// Errors raised by waitlist adapters.
    pub enum WaitlistRepositoryError {
        Connection { message: String } => "waitlist connection failed: {message}",
        Query { message: String } => "waitlist query failed: {message}",
    }
}

/// Append-only store of waitlist sign-ups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Append an entry. Duplicate emails are kept.
    async fn append(&self, entry: &WaitlistEntry) -> Result<(), WaitlistRepositoryError>;
}

/// Fixture store that accepts and discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWaitlistRepository;

#[async_trait]
impl WaitlistRepository for FixtureWaitlistRepository {
    async fn append(&self, _entry: &WaitlistEntry) -> Result<(), WaitlistRepositoryError> {
        Ok(())
    }
}
