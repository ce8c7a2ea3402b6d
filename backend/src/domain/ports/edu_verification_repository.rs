//! Port for pending student email verifications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::UserId;
use crate::domain::verification::CodeDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by verification store adapters.
    pub enum EduVerificationRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "verification store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "verification store query failed: {message}",
    }
}

/// A code awaiting confirmation. Only the digest is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub user_id: UserId,
    pub code_digest: CodeDigest,
    pub expires_at: DateTime<Utc>,
}

/// Store of outstanding verification codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EduVerificationRepository: Send + Sync {
    /// Store a code, replacing any earlier one for the same user.
    async fn store(
        &self,
        pending: &PendingVerification,
    ) -> Result<(), EduVerificationRepositoryError>;

    /// Atomically consume a matching, unexpired code and flag the profile
    /// as verified.
    ///
    /// Returns `false` when no row matched. A consumed code never matches
    /// again.
    async fn consume(
        &self,
        user_id: &UserId,
        code_digest: &CodeDigest,
        now: DateTime<Utc>,
    ) -> Result<bool, EduVerificationRepositoryError>;
}

/// Fixture store that accepts writes and rejects every code.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEduVerificationRepository;

#[async_trait]
impl EduVerificationRepository for FixtureEduVerificationRepository {
    async fn store(
        &self,
        _pending: &PendingVerification,
    ) -> Result<(), EduVerificationRepositoryError> {
        Ok(())
    }

    async fn consume(
        &self,
        _user_id: &UserId,
        _code_digest: &CodeDigest,
        _now: DateTime<Utc>,
    ) -> Result<bool, EduVerificationRepositoryError> {
        Ok(false)
    }
}
