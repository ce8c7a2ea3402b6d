//! Three-step onboarding wizard: campuses, then categories, then `.edu`
//! verification.
//!
//! Transitions are pure. Actions that need the outside world (sending the
//! verification email, persisting selections) come back as an
//! [`OnboardingEffect`] for the caller to carry out; the state only records
//! the pending email once [`OnboardingState::verification_sent`] confirms the
//! dispatch succeeded.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::campus::{CampusDirectory, CampusId};
use super::place::KNOWN_CATEGORIES;
use super::user::OnboardingSelections;

/// Wizard position. Moves by exactly one step per navigation action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    #[default]
    Campuses,
    Categories,
    Edu,
}

impl OnboardingStep {
    /// The following step, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Campuses => Some(Self::Categories),
            Self::Categories => Some(Self::Edu),
            Self::Edu => None,
        }
    }

    /// The preceding step, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Campuses => None,
            Self::Categories => Some(Self::Campuses),
            Self::Edu => Some(Self::Categories),
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Campuses => "campuses",
            Self::Categories => "categories",
            Self::Edu => "edu",
        };
        f.write_str(name)
    }
}

/// An address that passed the `.edu` suffix guard.
///
/// The guard only checks that the text ends with the literal `.edu`. It does
/// not trim or otherwise validate; deliverability is the dispatcher's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduEmail(String);

impl EduEmail {
    /// # Examples
    /// ```
    /// use backend::domain::onboarding::EduEmail;
    ///
    /// assert!(EduEmail::parse("alice@uic.edu").is_ok());
    /// assert!(EduEmail::parse("alice@gmail.com").is_err());
    /// assert!(EduEmail::parse("alice@uic.edu ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, OnboardingError> {
        if raw.ends_with(".edu") {
            Ok(Self(raw.to_owned()))
        } else {
            Err(OnboardingError::NotEduEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Actions a student can take in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OnboardingAction {
    Continue,
    Back,
    ToggleCampus {
        #[schema(value_type = String)]
        campus: CampusId,
    },
    ToggleCategory {
        category: String,
    },
    SetEduEmail {
        email: String,
    },
    RequestVerification,
    UseDifferentEmail,
    Skip,
    Finish,
}

/// Side effect the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingEffect {
    None,
    /// Send the verification email, then call
    /// [`OnboardingState::verification_sent`].
    DispatchVerification(EduEmail),
    /// Persist the selections and leave the wizard.
    PersistAndExit(OnboardingSelections),
    /// Leave the wizard once the profile is confirmed verified.
    FinishIfVerified(OnboardingSelections),
}

/// Rejected transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("there is no step before {0}")]
    NoPreviousStep(OnboardingStep),
    #[error("there is no step after {0}")]
    NoNextStep(OnboardingStep),
    #[error("this action is only available on the {expected} step")]
    WrongStep { expected: OnboardingStep },
    #[error("unknown campus: {0}")]
    UnknownCampus(CampusId),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("Please enter a valid .edu email address")]
    NotEduEmail,
    #[error("a verification email is already on its way")]
    VerificationPending,
    #[error("no verification email has been sent yet")]
    VerificationNotRequested,
}

impl OnboardingError {
    /// Machine-readable code used in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoPreviousStep(_) | Self::NoNextStep(_) | Self::WrongStep { .. } => "wrong_step",
            Self::UnknownCampus(_) => "unknown_campus",
            Self::UnknownCategory(_) => "unknown_category",
            Self::NotEduEmail => "not_edu_email",
            Self::VerificationPending => "verification_pending",
            Self::VerificationNotRequested => "verification_not_requested",
        }
    }
}

/// Per-session onboarding state.
///
/// ## Invariants
/// - `edu_pending` is only `true` while `step` is [`OnboardingStep::Edu`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "OnboardingStateDto")]
pub struct OnboardingState {
    step: OnboardingStep,
    #[schema(value_type = Vec<String>)]
    selected_campuses: BTreeSet<CampusId>,
    selected_categories: BTreeSet<String>,
    edu_email: String,
    edu_pending: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OnboardingStateDto {
    step: OnboardingStep,
    #[serde(default)]
    selected_campuses: BTreeSet<CampusId>,
    #[serde(default)]
    selected_categories: BTreeSet<String>,
    #[serde(default)]
    edu_email: String,
    #[serde(default)]
    edu_pending: bool,
}

impl TryFrom<OnboardingStateDto> for OnboardingState {
    type Error = String;

    fn try_from(dto: OnboardingStateDto) -> Result<Self, Self::Error> {
        if dto.edu_pending && dto.step != OnboardingStep::Edu {
            return Err(format!("eduPending set on the {} step", dto.step));
        }
        Ok(Self {
            step: dto.step,
            selected_campuses: dto.selected_campuses,
            selected_categories: dto.selected_categories,
            edu_email: dto.edu_email,
            edu_pending: dto.edu_pending,
        })
    }
}

impl OnboardingState {
    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn selected_campuses(&self) -> &BTreeSet<CampusId> {
        &self.selected_campuses
    }

    pub fn selected_categories(&self) -> &BTreeSet<String> {
        &self.selected_categories
    }

    pub fn edu_email(&self) -> &str {
        self.edu_email.as_str()
    }

    pub fn edu_pending(&self) -> bool {
        self.edu_pending
    }

    /// Current campus and category choices, ready to persist.
    pub fn selections(&self) -> OnboardingSelections {
        OnboardingSelections {
            campuses: self.selected_campuses.iter().cloned().collect(),
            categories: self.selected_categories.iter().cloned().collect(),
        }
    }

    /// Apply one action. On error the state is left untouched.
    pub fn apply(
        &mut self,
        action: OnboardingAction,
        campuses: &CampusDirectory,
    ) -> Result<OnboardingEffect, OnboardingError> {
        match action {
            OnboardingAction::Continue => {
                self.step = self.step.next().ok_or(OnboardingError::NoNextStep(self.step))?;
            }
            OnboardingAction::Back => {
                self.step = self
                    .step
                    .previous()
                    .ok_or(OnboardingError::NoPreviousStep(self.step))?;
                self.edu_pending = false;
            }
            OnboardingAction::ToggleCampus { campus } => {
                self.require_step(OnboardingStep::Campuses)?;
                if !campuses.contains(&campus) {
                    return Err(OnboardingError::UnknownCampus(campus));
                }
                toggle(&mut self.selected_campuses, campus);
            }
            OnboardingAction::ToggleCategory { category } => {
                self.require_step(OnboardingStep::Categories)?;
                let category = category.trim().to_lowercase();
                if !KNOWN_CATEGORIES.contains(&category.as_str()) {
                    return Err(OnboardingError::UnknownCategory(category));
                }
                toggle(&mut self.selected_categories, category);
            }
            OnboardingAction::SetEduEmail { email } => {
                self.require_step(OnboardingStep::Edu)?;
                if self.edu_pending {
                    return Err(OnboardingError::VerificationPending);
                }
                self.edu_email = email;
            }
            OnboardingAction::RequestVerification => {
                self.require_step(OnboardingStep::Edu)?;
                if self.edu_pending {
                    return Err(OnboardingError::VerificationPending);
                }
                let email = EduEmail::parse(&self.edu_email)?;
                return Ok(OnboardingEffect::DispatchVerification(email));
            }
            OnboardingAction::UseDifferentEmail => {
                self.require_step(OnboardingStep::Edu)?;
                if !self.edu_pending {
                    return Err(OnboardingError::VerificationNotRequested);
                }
                self.edu_pending = false;
                self.edu_email.clear();
            }
            OnboardingAction::Skip => {
                return Ok(OnboardingEffect::PersistAndExit(self.selections()));
            }
            OnboardingAction::Finish => {
                self.require_step(OnboardingStep::Edu)?;
                return Ok(OnboardingEffect::FinishIfVerified(self.selections()));
            }
        }
        Ok(OnboardingEffect::None)
    }

    /// Record that the verification email for the current address went out.
    pub fn verification_sent(&mut self) {
        if self.step == OnboardingStep::Edu {
            self.edu_pending = true;
        }
    }

    fn require_step(&self, expected: OnboardingStep) -> Result<(), OnboardingError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(OnboardingError::WrongStep { expected })
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

#[cfg(test)]
#[path = "onboarding_tests.rs"]
mod tests;
