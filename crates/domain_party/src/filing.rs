//! The party list of a filing

use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::FilingId;
use crate::error::PartyError;
use crate::owner_group::{normalize_common_interest, OwnerGroup};
use crate::party::{Party, PartyRole};

/// Ordered parties on one filing, plus its home owner groups
///
/// Positions are stable until a party is removed; forms editing an existing
/// party refer to it by index. A role that does not allow many parties
/// holds at most one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingParties {
    pub filing_id: FilingId,
    #[serde(default)]
    parties: Vec<Party>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    owner_groups: Vec<OwnerGroup>,
}

impl FilingParties {
    pub fn new(filing_id: FilingId) -> Self {
        Self {
            filing_id,
            parties: Vec::new(),
            owner_groups: Vec::new(),
        }
    }

    /// Wraps parties loaded from an existing filing as they are
    pub fn from_parties(filing_id: FilingId, parties: Vec<Party>) -> Self {
        Self {
            filing_id,
            parties,
            owner_groups: Vec::new(),
        }
    }

    /// Appends a party and returns its index
    ///
    /// # Errors
    ///
    /// `RoleAlreadyFilled` if the role admits one party and one is present.
    pub fn push(&mut self, party: Party) -> Result<usize, PartyError> {
        self.ensure_role_open(party.role, None)?;
        self.parties.push(party);
        Ok(self.parties.len() - 1)
    }

    /// Replaces the party at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, party: Party) -> Result<Party, PartyError> {
        if index >= self.parties.len() {
            return Err(PartyError::PartyNotFound(index));
        }
        self.ensure_role_open(party.role, Some(index))?;
        Ok(std::mem::replace(&mut self.parties[index], party))
    }

    pub fn remove(&mut self, index: usize) -> Result<Party, PartyError> {
        if index >= self.parties.len() {
            return Err(PartyError::PartyNotFound(index));
        }
        Ok(self.parties.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Party> {
        self.parties.get(index)
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.iter()
    }

    pub fn as_slice(&self) -> &[Party] {
        &self.parties
    }

    /// Parties in a role, with their indices
    pub fn by_role(&self, role: PartyRole) -> impl Iterator<Item = (usize, &Party)> {
        self.parties
            .iter()
            .enumerate()
            .filter(move |(_, party)| party.role == role)
    }

    /// Adds an owner group and returns its group id
    ///
    /// Owner party types are reconciled against their names before the group
    /// is validated. Group ids increase with each added group, and
    /// tenants-in-common interests are rewritten over a common denominator.
    pub fn add_owner_group(&mut self, mut group: OwnerGroup) -> Result<u32, PartyError> {
        group.reconcile_party_types();
        group.validate()?;

        let group_id = self
            .owner_groups
            .iter()
            .map(|existing| existing.group_id)
            .max()
            .unwrap_or(0)
            + 1;
        group.group_id = group_id;

        info!(
            filing_id = %self.filing_id,
            group_id,
            tenancy = %group.tenancy_type,
            owners = group.owners.len(),
            "Owner group added"
        );
        self.owner_groups.push(group);
        normalize_common_interest(&mut self.owner_groups);
        Ok(group_id)
    }

    pub fn remove_owner_group(&mut self, group_id: u32) -> Result<OwnerGroup, PartyError> {
        let position = self
            .owner_groups
            .iter()
            .position(|group| group.group_id == group_id)
            .ok_or(PartyError::OwnerGroupNotFound(group_id))?;
        Ok(self.owner_groups.remove(position))
    }

    pub fn owner_groups(&self) -> &[OwnerGroup] {
        &self.owner_groups
    }

    fn ensure_role_open(&self, role: PartyRole, exclude_index: Option<usize>) -> Result<(), PartyError> {
        if role.allows_many() {
            return Ok(());
        }
        match self.by_role(role).find(|(index, _)| Some(*index) != exclude_index) {
            Some(_) => Err(PartyError::RoleAlreadyFilled(role)),
            None => Ok(()),
        }
    }
}
