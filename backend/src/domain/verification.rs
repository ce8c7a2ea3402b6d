//! Student email verification codes.
//!
//! Codes are six decimal digits. Only a salted SHA-256 digest is ever stored,
//! and a code is consumed by a single conditional update so a replayed code
//! can never succeed twice.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::Error;
use super::ports::{
    EduVerificationCommand, EduVerificationRepository, EduVerificationRepositoryError,
    PendingVerification,
};
use super::user::UserId;

/// Digits in a verification code.
pub const CODE_LENGTH: usize = 6;
/// Default lifetime of an issued code.
pub const DEFAULT_CODE_TTL: Duration = Duration::minutes(15);

/// Denial returned for unknown, used or expired codes.
pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired code";

/// A plaintext six-digit code. Zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(Zeroizing<String>);

impl VerificationCode {
    /// Accept exactly [`CODE_LENGTH`] ASCII digits, ignoring surrounding
    /// whitespace.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::verification::VerificationCode;
    ///
    /// assert!(VerificationCode::parse(" 042917 ").is_some());
    /// assert!(VerificationCode::parse("42917").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (trimmed.len() == CODE_LENGTH && trimmed.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Draw a uniformly random, zero-padded code.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let value: u32 = rng.gen_range(0..1_000_000);
        Self(Zeroizing::new(format!("{value:0CODE_LENGTH$}")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Digest bound to `user_id` so equal codes for different users differ.
    pub fn digest_for(&self, user_id: &UserId) -> CodeDigest {
        let mut hasher = Sha256::new();
        hasher.update(user_id.as_ref().as_bytes());
        hasher.update(b":");
        hasher.update(self.0.as_bytes());
        CodeDigest(hex::encode(hasher.finalize()))
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

/// Hex-encoded SHA-256 digest of a code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeDigest(String);

impl CodeDigest {
    /// Wrap a digest read back from storage.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A freshly minted code, ready to be emailed.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub code: VerificationCode,
    pub record: PendingVerification,
}

/// Issues and checks verification codes.
pub struct EduVerificationService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<R> Clone for EduVerificationService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            clock: Arc::clone(&self.clock),
            ttl: self.ttl,
        }
    }
}

impl<R> EduVerificationService<R> {
    /// Codes issued by this service expire `ttl` after issue.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { repo, clock, ttl }
    }
}

fn map_repository_error(error: EduVerificationRepositoryError) -> Error {
    match error {
        EduVerificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("verification store unavailable: {message}"))
        }
        EduVerificationRepositoryError::Query { message } => {
            Error::internal(format!("verification store error: {message}"))
        }
    }
}

impl<R> EduVerificationService<R>
where
    R: EduVerificationRepository,
{
    /// Mint a code for `user_id` and store its digest.
    pub async fn issue(&self, user_id: &UserId) -> Result<IssuedCode, Error> {
        let code = VerificationCode::generate(&mut rand::thread_rng());
        let record = PendingVerification {
            user_id: user_id.clone(),
            code_digest: code.digest_for(user_id),
            expires_at: self.clock.utc() + self.ttl,
        };
        self.repo.store(&record).await.map_err(map_repository_error)?;
        debug!(user_id = %user_id, expires_at = %record.expires_at, "verification code issued");
        Ok(IssuedCode { code, record })
    }
}

#[async_trait]
impl<R> EduVerificationCommand for EduVerificationService<R>
where
    R: EduVerificationRepository,
{
    async fn verify_code(&self, user_id: &UserId, code: &str) -> Result<(), Error> {
        // Malformed input can never match a stored digest.
        let Some(code) = VerificationCode::parse(code) else {
            return Err(Error::invalid_request(INVALID_CODE_MESSAGE));
        };
        let consumed = self
            .repo
            .consume(user_id, &code.digest_for(user_id), self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if consumed {
            info!(user_id = %user_id, "student email verified by code");
            Ok(())
        } else {
            Err(Error::invalid_request(INVALID_CODE_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "verification_tests.rs"]
mod tests;
