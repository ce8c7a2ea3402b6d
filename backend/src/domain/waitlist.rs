//! Waitlist sign-ups for features that are not live yet.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::Error;
use super::ports::{WaitlistCommand, WaitlistRepository, WaitlistRepositoryError};

/// Tag used when the caller does not name a list.
pub const DEFAULT_WAITLIST_KIND: &str = "rewards";
const KIND_MAX: usize = 32;

/// Reasons a waitlist sign-up is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitlistValidationError {
    /// Blank email address.
    #[error("email address is required")]
    MissingEmail,
    /// Address without an `@`.
    #[error("email address must contain '@'")]
    MalformedEmail,
    /// Sign-up type outside the allowed slug form.
    #[error("waitlist type must be 1 to 32 characters of [a-z0-9_-]")]
    InvalidKind,
}

/// One sign-up. Duplicates are permitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    email: String,
    kind: String,
}

impl WaitlistEntry {
    /// Validate an email and list tag. A blank tag means
    /// [`DEFAULT_WAITLIST_KIND`].
    pub fn new(email: &str, kind: Option<&str>) -> Result<Self, WaitlistValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(WaitlistValidationError::MissingEmail);
        }
        let (local, domain) = email
            .split_once('@')
            .ok_or(WaitlistValidationError::MalformedEmail)?;
        if local.is_empty() || domain.is_empty() {
            return Err(WaitlistValidationError::MalformedEmail);
        }

        let kind = match kind.map(str::trim) {
            None | Some("") => DEFAULT_WAITLIST_KIND.to_owned(),
            Some(raw) => {
                let valid = raw.len() <= KIND_MAX
                    && raw
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
                if !valid {
                    return Err(WaitlistValidationError::InvalidKind);
                }
                raw.to_owned()
            }
        };

        Ok(Self {
            email: email.to_owned(),
            kind,
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }
}

/// Validates sign-ups and appends them through a [`WaitlistRepository`].
#[derive(Clone)]
pub struct WaitlistService<R> {
    repo: Arc<R>,
}

impl<R> WaitlistService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> WaitlistCommand for WaitlistService<R>
where
    R: WaitlistRepository,
{
    async fn join(&self, entry: &WaitlistEntry) -> Result<(), Error> {
        self.repo.append(entry).await.map_err(|error| match error {
            WaitlistRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("waitlist unavailable: {message}"))
            }
            WaitlistRepositoryError::Query { message } => {
                Error::internal(format!("waitlist error: {message}"))
            }
        })?;
        info!(kind = entry.kind(), "waitlist entry recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockWaitlistRepository;
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn blank_kind_defaults_to_rewards(#[case] kind: Option<&str>) {
        let entry = WaitlistEntry::new(" ada@uic.edu ", kind).expect("valid entry");
        assert_eq!(entry.email(), "ada@uic.edu");
        assert_eq!(entry.kind(), "rewards");
    }

    #[rstest]
    #[case("", None, WaitlistValidationError::MissingEmail)]
    #[case("ada", None, WaitlistValidationError::MalformedEmail)]
    #[case("@uic.edu", None, WaitlistValidationError::MalformedEmail)]
    #[case("ada@uic.edu", Some("Rewards!"), WaitlistValidationError::InvalidKind)]
    fn rejects_invalid_entries(
        #[case] email: &str,
        #[case] kind: Option<&str>,
        #[case] expected: WaitlistValidationError,
    ) {
        assert_eq!(WaitlistEntry::new(email, kind), Err(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn join_appends_without_dedup() {
        let entry = WaitlistEntry::new("ada@uic.edu", Some("rewards")).expect("valid");
        let mut repo = MockWaitlistRepository::new();
        repo.expect_append()
            .with(eq(entry.clone()))
            .times(2)
            .returning(|_| Ok(()));
        let service = WaitlistService::new(Arc::new(repo));

        service.join(&entry).await.expect("first");
        service.join(&entry).await.expect("second");
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_is_retryable() {
        let mut repo = MockWaitlistRepository::new();
        repo.expect_append()
            .return_once(|_| Err(WaitlistRepositoryError::connection("refused")));
        let service = WaitlistService::new(Arc::new(repo));
        let entry = WaitlistEntry::new("ada@uic.edu", None).expect("valid");

        let err = service.join(&entry).await.expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
