//! Party domain errors
//!
//! Every error here is scoped to a single form instance and is resolved by the
//! user editing, cancelling, or resubmitting. None of them is fatal to the
//! filing.

use thiserror::Error;

use core_kernel::{CoreError, PortError};
use crate::party::PartyRole;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// One or more fields failed validation on submit
    #[error("Party validation failed: {0}")]
    ValidationFailed(String),

    /// The candidate is equivalent to a party already on the filing
    #[error("Duplicate party: {0}")]
    DuplicateParty(String),

    /// The business name search service could not be reached
    #[error("Business search unavailable: {0}")]
    SearchUnavailable(String),

    /// No party at the given position in the filing
    #[error("Party not found at index {0}")]
    PartyNotFound(usize),

    /// The role admits one party per filing and is already filled
    #[error("A filing can have only one {0}")]
    RoleAlreadyFilled(PartyRole),

    /// An owner group breaks the rules of its tenancy
    #[error("Invalid owner group: {0}")]
    InvalidOwnerGroup(String),

    #[error("Owner group {0} not found")]
    OwnerGroupNotFound(u32),

    /// The form cannot perform the action from its current state
    #[error("Cannot {action} while form is {from}")]
    InvalidStateTransition { from: String, action: String },

    /// Invalid party data provided
    #[error("Invalid party data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PartyError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }

    /// Creates a ValidationFailed error from `field: message` pairs
    pub fn validation_failed(errors: Vec<String>) -> Self {
        PartyError::ValidationFailed(errors.join("; "))
    }

    pub fn invalid_transition(from: impl std::fmt::Display, action: impl Into<String>) -> Self {
        PartyError::InvalidStateTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    /// Whether the user can recover by editing or retrying
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PartyError::Core(CoreError::Configuration(_)))
    }
}

impl From<PortError> for PartyError {
    fn from(error: PortError) -> Self {
        PartyError::SearchUnavailable(error.to_string())
    }
}
