//! Student profile data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::campus::CampusId;

/// Validation errors returned by the user primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identity-provider user identifier, always a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Name shown on the profile, usually the provider's `full_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name: String = display_name.into();
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum length of a generated username.
pub const USERNAME_MAX: usize = 20;
const USERNAME_FALLBACK: &str = "user";

/// Handle derived from the local part of a sign-in email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Lowercase the local part, keep only `[a-z0-9_.]`, truncate to
    /// [`USERNAME_MAX`] characters and fall back to `"user"` when nothing is
    /// left.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Username;
    ///
    /// assert_eq!(Username::from_email("alice@uic.edu").as_ref(), "alice");
    /// assert_eq!(Username::from_email("???@depaul.edu").as_ref(), "user");
    /// ```
    pub fn from_email(email: &str) -> Self {
        let local = email.split('@').next().unwrap_or_default();
        let handle: String = local
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.'))
            .take(USERNAME_MAX)
            .collect();
        if handle.is_empty() {
            Self(USERNAME_FALLBACK.to_owned())
        } else {
            Self(handle)
        }
    }

    /// Wrap a username read back from storage.
    pub(crate) fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Campus and category choices collected during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSelections {
    #[schema(value_type = Vec<String>)]
    pub campuses: Vec<CampusId>,
    pub categories: Vec<String>,
}

/// Stored profile of a signed-in student.
///
/// ## Invariants
/// - `id` matches the identity provider's user id.
/// - `edu_verified` only ever flips from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    display_name: Option<DisplayName>,
    #[schema(value_type = String, example = "ada")]
    username: Username,
    edu_verified: bool,
    selections: OnboardingSelections,
}

impl UserProfile {
    /// A freshly signed-up, unverified student.
    pub fn new(id: UserId, display_name: Option<DisplayName>, username: Username) -> Self {
        Self {
            id,
            display_name,
            username,
            edu_verified: false,
            selections: OnboardingSelections::default(),
        }
    }

    /// Rebuild a profile from storage.
    pub fn restore(
        id: UserId,
        display_name: Option<DisplayName>,
        username: Username,
        edu_verified: bool,
        selections: OnboardingSelections,
    ) -> Self {
        Self {
            id,
            display_name,
            username,
            edu_verified,
            selections,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn edu_verified(&self) -> bool {
        self.edu_verified
    }

    pub fn selections(&self) -> &OnboardingSelections {
        &self.selections
    }
}
