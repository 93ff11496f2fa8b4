//! Party entity
//!
//! A party is anyone named on a registry filing: the registering party,
//! secured parties, debtors, home owners and the executors or administrators
//! acting for them, or the submitting party. Each is either a person or a
//! business, with optional contact details and one postal address.
//!
//! # Name model
//!
//! The name is an enum, so a party always carries exactly one of a person
//! name or a business name. Switching kind replaces the name wholesale:
//!
//! ```rust
//! use domain_party::party::{Party, PartyKind, PartyRole};
//!
//! let mut party = Party::business(PartyRole::SecuredParty, "Acme Ltd");
//! party.switch_kind(PartyKind::Person);
//! assert!(party.name.business_name().is_none());
//! ```
//!
//! # JSON shape
//!
//! The name is flattened into the party object as either `personName`
//! (`{first, middle, last}`) or `businessName`. The keys `individualName`
//! and `organizationName` are accepted on input.

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::PartyId;
use crate::address::Address;

/// Whether a party is a person or a business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyKind {
    Person,
    Business,
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyKind::Person => write!(f, "person"),
            PartyKind::Business => write!(f, "business"),
        }
    }
}

/// The capacity in which a party appears on a filing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyRole {
    RegisteringParty,
    SecuredParty,
    Debtor,
    /// Owner of a manufactured home
    Owner,
    /// Executor of a deceased owner's estate
    Executor,
    /// Court-appointed administrator of a deceased owner's estate
    Administrator,
    SubmittingParty,
}

impl PartyRole {
    /// Whether a filing may carry more than one party in this role
    pub fn allows_many(&self) -> bool {
        matches!(
            self,
            PartyRole::SecuredParty
                | PartyRole::Debtor
                | PartyRole::Owner
                | PartyRole::Executor
                | PartyRole::Administrator
        )
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PartyRole::RegisteringParty => "registering party",
            PartyRole::SecuredParty => "secured party",
            PartyRole::Debtor => "debtor",
            PartyRole::Owner => "owner",
            PartyRole::Executor => "executor",
            PartyRole::Administrator => "administrator",
            PartyRole::SubmittingParty => "submitting party",
        };
        f.write_str(label)
    }
}

/// How the registry records an owner in an owner group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    OwnerInd,
    OwnerBus,
    Executor,
    Administrator,
}

impl PartyType {
    /// Settles a declared type against the name actually supplied
    ///
    /// A missing owner type is inferred from the name, and an owner type that
    /// contradicts the name is corrected. Executor and administrator stand as
    /// declared.
    pub fn reconcile(declared: Option<PartyType>, kind: PartyKind) -> PartyType {
        match (declared, kind) {
            (None | Some(PartyType::OwnerBus), PartyKind::Person) => PartyType::OwnerInd,
            (None | Some(PartyType::OwnerInd), PartyKind::Business) => PartyType::OwnerBus,
            (Some(declared), _) => declared,
        }
    }

    /// Role a party of this type holds on the filing
    pub fn role(&self) -> PartyRole {
        match self {
            PartyType::OwnerInd | PartyType::OwnerBus => PartyRole::Owner,
            PartyType::Executor => PartyRole::Executor,
            PartyType::Administrator => PartyRole::Administrator,
        }
    }

    /// Whether the party acts for a deceased owner's estate
    pub fn is_representative(&self) -> bool {
        matches!(self, PartyType::Executor | PartyType::Administrator)
    }
}

/// Legal name of a natural person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonName {
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, middle: Option<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            middle,
            last: last.into(),
        }
    }

    /// Returns the full name in "First Middle Last" format
    pub fn full_name(&self) -> String {
        [
            self.first.trim(),
            self.middle.as_deref().unwrap_or("").trim(),
            self.last.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// The one name a party carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyName {
    #[serde(alias = "individualName")]
    PersonName(PersonName),
    #[serde(alias = "organizationName")]
    BusinessName(String),
}

impl PartyName {
    /// A blank name of the given kind
    pub fn empty(kind: PartyKind) -> Self {
        match kind {
            PartyKind::Person => PartyName::PersonName(PersonName::default()),
            PartyKind::Business => PartyName::BusinessName(String::new()),
        }
    }

    pub fn kind(&self) -> PartyKind {
        match self {
            PartyName::PersonName(_) => PartyKind::Person,
            PartyName::BusinessName(_) => PartyKind::Business,
        }
    }

    pub fn person(&self) -> Option<&PersonName> {
        match self {
            PartyName::PersonName(name) => Some(name),
            PartyName::BusinessName(_) => None,
        }
    }

    pub fn business_name(&self) -> Option<&str> {
        match self {
            PartyName::BusinessName(name) => Some(name),
            PartyName::PersonName(_) => None,
        }
    }

    /// Whether every name component is blank
    pub fn is_blank(&self) -> bool {
        match self {
            PartyName::PersonName(name) => name.full_name().is_empty(),
            PartyName::BusinessName(name) => name.trim().is_empty(),
        }
    }
}

/// Validatable party fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyField {
    First,
    Middle,
    Last,
    BusinessName,
    Email,
    Phone,
    PhoneExtension,
}

impl PartyField {
    pub const PERSON: [PartyField; 6] = [
        PartyField::First,
        PartyField::Middle,
        PartyField::Last,
        PartyField::Email,
        PartyField::Phone,
        PartyField::PhoneExtension,
    ];

    pub const BUSINESS: [PartyField; 4] = [
        PartyField::BusinessName,
        PartyField::Email,
        PartyField::Phone,
        PartyField::PhoneExtension,
    ];

    /// Fields that apply to a party of `kind`
    pub fn for_kind(kind: PartyKind) -> &'static [PartyField] {
        match kind {
            PartyKind::Person => &Self::PERSON,
            PartyKind::Business => &Self::BUSINESS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PartyField::First => "first",
            PartyField::Middle => "middle",
            PartyField::Last => "last",
            PartyField::BusinessName => "businessName",
            PartyField::Email => "email",
            PartyField::Phone => "phone",
            PartyField::PhoneExtension => "phoneExtension",
        }
    }
}

impl fmt::Display for PartyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A party named on a filing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Unique party identifier
    #[serde(default)]
    pub id: PartyId,
    pub role: PartyRole,
    /// Registry type of an owner-group member, as declared or reconciled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_type: Option<PartyType>,
    #[serde(flatten)]
    pub name: PartyName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_extension: Option<String>,
    #[serde(default)]
    pub address: Address,
}

impl Party {
    /// Creates a blank party of the given kind
    pub fn new(role: PartyRole, kind: PartyKind) -> Self {
        Self {
            id: PartyId::new_v7(),
            role,
            party_type: None,
            name: PartyName::empty(kind),
            email: None,
            phone: None,
            phone_extension: None,
            address: Address::default(),
        }
    }

    /// Creates a person party
    ///
    /// # Arguments
    ///
    /// * `role` - Capacity on the filing
    /// * `first` / `middle` / `last` - Legal name components
    pub fn person(
        role: PartyRole,
        first: impl Into<String>,
        middle: Option<String>,
        last: impl Into<String>,
    ) -> Self {
        Self {
            name: PartyName::PersonName(PersonName::new(first, middle, last)),
            ..Self::new(role, PartyKind::Person)
        }
    }

    /// Creates a business party
    pub fn business(role: PartyRole, name: impl Into<String>) -> Self {
        Self {
            name: PartyName::BusinessName(name.into()),
            ..Self::new(role, PartyKind::Business)
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn kind(&self) -> PartyKind {
        self.name.kind()
    }

    /// Switches between person and business, clearing the previous name
    ///
    /// Switching to the current kind keeps the name.
    pub fn switch_kind(&mut self, kind: PartyKind) {
        if self.kind() != kind {
            self.name = PartyName::empty(kind);
        }
    }

    /// Settles `party_type` against the name and aligns the role with it
    ///
    /// Without a declared type, an executor or administrator role stands in
    /// for one.
    pub fn reconcile_party_type(&mut self) -> PartyType {
        let declared = self.party_type.or(match self.role {
            PartyRole::Executor => Some(PartyType::Executor),
            PartyRole::Administrator => Some(PartyType::Administrator),
            _ => None,
        });
        let party_type = PartyType::reconcile(declared, self.kind());
        self.party_type = Some(party_type);
        self.role = party_type.role();
        party_type
    }

    /// Current value of a field; fields of the other kind read as empty
    pub fn field(&self, field: PartyField) -> &str {
        match (field, &self.name) {
            (PartyField::First, PartyName::PersonName(name)) => &name.first,
            (PartyField::Middle, PartyName::PersonName(name)) => {
                name.middle.as_deref().unwrap_or("")
            }
            (PartyField::Last, PartyName::PersonName(name)) => &name.last,
            (PartyField::BusinessName, PartyName::BusinessName(name)) => name,
            (PartyField::Email, _) => self.email.as_deref().unwrap_or(""),
            (PartyField::Phone, _) => self.phone.as_deref().unwrap_or(""),
            (PartyField::PhoneExtension, _) => self.phone_extension.as_deref().unwrap_or(""),
            _ => "",
        }
    }

    /// Returns the display name for the party
    ///
    /// - Person: "First Middle Last"
    /// - Business: the business name
    pub fn display_name(&self) -> String {
        match &self.name {
            PartyName::PersonName(name) => name.full_name(),
            PartyName::BusinessName(name) => name.trim().to_string(),
        }
    }
}
