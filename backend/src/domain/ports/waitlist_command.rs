//! Driving port for joining a waitlist.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::waitlist::WaitlistEntry;

/// Accepts waitlist sign-ups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaitlistCommand: Send + Sync {
    async fn join(&self, entry: &WaitlistEntry) -> Result<(), Error>;
}
