//! Party edit form
//!
//! [`PartyForm`] owns a working copy of one party while it is added or edited
//! and drives it through validation, duplicate detection, and commit:
//!
//! ```text
//! Empty ──select_kind──▶ TypeSelected ──edit──▶ Populated ──submit──▶ Submitting
//!                                                   ▲                    │
//!                                                   │        ┌───────────┼──────────────┐
//!                                     resolve_duplicate      ▼           ▼              ▼
//!                                                   └── DuplicateFound  Committed   (invalid: back
//!                                                                                    to Populated)
//! any non-terminal state ──cancel──▶ Discarded
//! ```
//!
//! The filing's party list is passed into [`PartyForm::edit`] and
//! [`PartyForm::submit`] explicitly; the form never holds on to it, so the
//! commit is the only point where the shared list changes.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::address::{Address, AddressField};
use crate::country::CountryTable;
use crate::dedup::find_matching_party;
use crate::error::PartyError;
use crate::filing::FilingParties;
use crate::party::{Party, PartyField, PartyKind, PartyName, PartyRole, PersonName};
use crate::ports::BusinessMatch;
use crate::search::{apply_selection, should_offer_selection};
use crate::validation::{AddressValidator, PartyValidator, ValidationResult};

/// Where a form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Empty,
    TypeSelected(PartyKind),
    Populated,
    Submitting,
    /// Submit found an equivalent party; waiting for the user
    DuplicateFound,
    Committed,
    Discarded,
}

impl FormState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FormState::Committed | FormState::Discarded)
    }

    fn is_editable(&self) -> bool {
        matches!(self, FormState::TypeSelected(_) | FormState::Populated)
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::Empty => write!(f, "empty"),
            FormState::TypeSelected(kind) => write!(f, "{} selected", kind),
            FormState::Populated => write!(f, "populated"),
            FormState::Submitting => write!(f, "submitting"),
            FormState::DuplicateFound => write!(f, "awaiting duplicate resolution"),
            FormState::Committed => write!(f, "committed"),
            FormState::Discarded => write!(f, "discarded"),
        }
    }
}

/// Add/edit form for one party on a filing
#[derive(Debug, Clone)]
pub struct PartyForm {
    state: FormState,
    party: Party,
    original: Party,
    edit_index: Option<usize>,
    address: AddressValidator,
    trigger_errors: bool,
    party_result: ValidationResult<PartyField>,
    duplicate_of: Option<usize>,
}

impl PartyForm {
    /// Form for adding a new party in `role`
    pub fn new(role: PartyRole) -> Self {
        Self::with_table(role, CountryTable::standard())
    }

    pub fn with_table(role: PartyRole, table: CountryTable) -> Self {
        let party = Party::new(role, PartyKind::Person);
        let address = AddressValidator::new(party.address.clone(), table);
        Self {
            state: FormState::Empty,
            original: party.clone(),
            party_result: PartyValidator::validate(&party),
            party,
            edit_index: None,
            address,
            trigger_errors: false,
            duplicate_of: None,
        }
    }

    /// Form for editing the party at `index` in place
    pub fn edit(parties: &FilingParties, index: usize) -> Result<Self, PartyError> {
        Self::edit_with_table(parties, index, CountryTable::standard())
    }

    pub fn edit_with_table(
        parties: &FilingParties,
        index: usize,
        table: CountryTable,
    ) -> Result<Self, PartyError> {
        let party = parties
            .get(index)
            .cloned()
            .ok_or(PartyError::PartyNotFound(index))?;
        debug!(index, party_id = %party.id, "Editing party");
        Ok(Self {
            state: FormState::Populated,
            original: party.clone(),
            party_result: PartyValidator::validate(&party),
            address: AddressValidator::new(party.address.clone(), table),
            party,
            edit_index: Some(index),
            trigger_errors: false,
            duplicate_of: None,
        })
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Working copy, with the address as currently edited
    pub fn party(&self) -> Party {
        Party {
            address: self.address.address().clone(),
            ..self.party.clone()
        }
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn address(&self) -> &AddressValidator {
        &self.address
    }

    /// Index of the party found equivalent on the last submit
    pub fn duplicate_of(&self) -> Option<usize> {
        self.duplicate_of
    }

    /// Chooses person or business; switching clears the other name
    pub fn select_kind(&mut self, kind: PartyKind) -> Result<(), PartyError> {
        match self.state {
            FormState::Empty | FormState::TypeSelected(_) => {
                self.party.switch_kind(kind);
                self.state = FormState::TypeSelected(kind);
            }
            FormState::Populated => {
                self.party.switch_kind(kind);
            }
            other => return Err(PartyError::invalid_transition(other, "select party type")),
        }
        self.revalidate();
        Ok(())
    }

    pub fn set_person_name(
        &mut self,
        first: impl Into<String>,
        middle: Option<String>,
        last: impl Into<String>,
    ) -> Result<(), PartyError> {
        self.ensure_editable("edit name")?;
        if self.party.kind() != PartyKind::Person {
            return Err(PartyError::invalid("person name on a business party"));
        }
        self.party.name = PartyName::PersonName(PersonName::new(first, middle, last));
        self.touched();
        Ok(())
    }

    pub fn set_business_name(&mut self, name: impl Into<String>) -> Result<(), PartyError> {
        self.ensure_editable("edit name")?;
        if self.party.kind() != PartyKind::Business {
            return Err(PartyError::invalid("business name on a person party"));
        }
        self.party.name = PartyName::BusinessName(name.into());
        self.touched();
        Ok(())
    }

    pub fn set_email(&mut self, email: Option<String>) -> Result<(), PartyError> {
        self.ensure_editable("edit email")?;
        self.party.email = email;
        self.touched();
        Ok(())
    }

    pub fn set_phone(&mut self, phone: Option<String>) -> Result<(), PartyError> {
        self.ensure_editable("edit phone")?;
        self.party.phone = phone;
        self.touched();
        Ok(())
    }

    pub fn set_phone_extension(&mut self, extension: Option<String>) -> Result<(), PartyError> {
        self.ensure_editable("edit phone extension")?;
        self.party.phone_extension = extension;
        self.touched();
        Ok(())
    }

    pub fn set_address_field(
        &mut self,
        field: AddressField,
        value: impl Into<String>,
    ) -> Result<(), PartyError> {
        self.ensure_editable("edit address")?;
        self.address.set_field(field, value);
        self.touched();
        Ok(())
    }

    /// Changes the address country, clearing a region that no longer applies
    pub fn set_country(&mut self, country: &str) -> Result<(), PartyError> {
        self.ensure_editable("change country")?;
        self.address.set_country(country);
        self.touched();
        Ok(())
    }

    /// Replaces the whole address
    pub fn set_address(&mut self, address: Address) -> Result<(), PartyError> {
        self.ensure_editable("edit address")?;
        self.address.replace(address);
        self.touched();
        Ok(())
    }

    /// Whether the name search matches warrant the selection dialog
    pub fn should_offer_selection(&self, matches: &[BusinessMatch]) -> bool {
        should_offer_selection(matches, &self.original, &self.party)
    }

    /// Uses a business picked from the search results
    pub fn select_business(&mut self, selected: &BusinessMatch) -> Result<(), PartyError> {
        self.ensure_editable("select business")?;
        if self.party.kind() != PartyKind::Business {
            return Err(PartyError::invalid("business selection on a person party"));
        }
        apply_selection(&mut self.party, selected);
        self.touched();
        Ok(())
    }

    /// Quiet validity of party fields and address together
    pub fn is_valid(&self) -> bool {
        self.party_result.is_valid && self.address.is_valid()
    }

    /// Message for a party field, once errors are triggered
    pub fn error_for(&self, field: PartyField) -> Option<&str> {
        if self.trigger_errors {
            self.party_result.error_for(field)
        } else {
            None
        }
    }

    /// Party field messages to display; empty until errors are triggered
    pub fn visible_errors(&self) -> BTreeMap<PartyField, &str> {
        if !self.trigger_errors {
            return BTreeMap::new();
        }
        self.party_result
            .errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
            .collect()
    }

    /// Validates, checks for duplicates, and commits into `parties`
    ///
    /// Returns the index of the committed party. On validation failure, or
    /// when the role is already filled, the form stays `Populated`; on a
    /// duplicate it moves to `DuplicateFound`.
    pub fn submit(&mut self, parties: &mut FilingParties) -> Result<usize, PartyError> {
        if !self.state.is_editable() {
            return Err(PartyError::invalid_transition(self.state, "submit"));
        }
        self.state = FormState::Submitting;
        self.trigger_errors = true;
        self.revalidate();

        let address = match self.address.finalize() {
            Ok(address) if self.party_result.is_valid => address,
            _ => {
                let mut messages = self.party_result.messages();
                messages.extend(self.address.result().messages());
                self.state = FormState::Populated;
                debug!(errors = messages.len(), "Party submit failed validation");
                return Err(PartyError::validation_failed(messages));
            }
        };

        let candidate = Party {
            address,
            ..self.party.clone()
        };

        if let Some(index) = find_matching_party(&candidate, parties.as_slice(), self.edit_index) {
            self.state = FormState::DuplicateFound;
            self.duplicate_of = Some(index);
            info!(
                candidate = %candidate.display_name(),
                existing_index = index,
                "Duplicate party found on submit"
            );
            return Err(PartyError::DuplicateParty(format!(
                "{} matches {} #{}",
                candidate.display_name(),
                parties.as_slice()[index].role,
                index + 1
            )));
        }

        let committed = match self.edit_index {
            Some(index) => parties.replace(index, candidate.clone()).map(|_| index),
            None => parties.push(candidate.clone()),
        };
        let index = match committed {
            Ok(index) => index,
            Err(error) => {
                self.state = FormState::Populated;
                return Err(error);
            }
        };

        info!(
            party_id = %candidate.id,
            role = %candidate.role,
            index,
            replaced = self.edit_index.is_some(),
            "Party committed to filing"
        );
        self.party = candidate;
        self.state = FormState::Committed;
        Ok(index)
    }

    /// Returns to editing after a duplicate was reported
    pub fn resolve_duplicate(&mut self) -> Result<(), PartyError> {
        if self.state != FormState::DuplicateFound {
            return Err(PartyError::invalid_transition(self.state, "resolve duplicate"));
        }
        self.duplicate_of = None;
        self.state = FormState::Populated;
        Ok(())
    }

    /// Abandons the form without touching the filing
    pub fn cancel(&mut self) -> Result<(), PartyError> {
        if self.state.is_terminal() {
            return Err(PartyError::invalid_transition(self.state, "cancel"));
        }
        debug!(from = %self.state, "Party form discarded");
        self.state = FormState::Discarded;
        Ok(())
    }

    fn ensure_editable(&self, action: &str) -> Result<(), PartyError> {
        if self.state.is_editable() {
            Ok(())
        } else {
            Err(PartyError::invalid_transition(self.state, action))
        }
    }

    fn touched(&mut self) {
        self.state = FormState::Populated;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.party_result = PartyValidator::validate(&self.party);
    }
}
