//! Home owner groups
//!
//! Owners of a manufactured home are registered in groups. A group's tenancy
//! type says how its owners hold the home:
//!
//! - `SOLE`: one owner
//! - `JOINT`: two or more joint tenants
//! - `COMMON`: tenants in common; each group holds a fractional interest
//! - `NA`: executors or administrators acting for an estate
//!
//! Interests of tenants-in-common groups are kept over one common
//! denominator across the filing (see [`normalize_common_interest`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PartyError;
use crate::party::Party;

/// How the owners of a group hold the home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenancyType {
    Sole,
    Joint,
    Common,
    Na,
}

impl fmt::Display for TenancyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TenancyType::Sole => "sole ownership",
            TenancyType::Joint => "joint tenancy",
            TenancyType::Common => "tenancy in common",
            TenancyType::Na => "estate representation",
        };
        f.write_str(label)
    }
}

/// One group of owners with its tenancy and interest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerGroup {
    /// Position on the filing, assigned when the group is added
    #[serde(default)]
    pub group_id: u32,
    pub tenancy_type: TenancyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_numerator: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_denominator: Option<u32>,
    #[serde(default)]
    pub owners: Vec<Party>,
}

impl OwnerGroup {
    pub fn new(tenancy_type: TenancyType, owners: Vec<Party>) -> Self {
        Self {
            group_id: 0,
            tenancy_type,
            interest_numerator: None,
            interest_denominator: None,
            owners,
        }
    }

    /// Sets the group's undivided interest, e.g. `1/2`
    pub fn with_interest(mut self, numerator: u32, denominator: u32) -> Self {
        self.interest_numerator = Some(numerator);
        self.interest_denominator = Some(denominator);
        self
    }

    /// The interest as `(numerator, denominator)` when both parts are set and
    /// non-zero
    pub fn interest(&self) -> Option<(u32, u32)> {
        match (self.interest_numerator, self.interest_denominator) {
            (Some(numerator), Some(denominator)) if numerator > 0 && denominator > 0 => {
                Some((numerator, denominator))
            }
            _ => None,
        }
    }

    /// Settles every owner's party type against its name
    pub fn reconcile_party_types(&mut self) {
        for owner in &mut self.owners {
            owner.reconcile_party_type();
        }
    }

    /// Checks owner count, owner details, and interest against the tenancy
    ///
    /// Party types are expected to be reconciled first.
    pub fn validate(&self) -> Result<(), PartyError> {
        if self.owners.is_empty() {
            return Err(PartyError::InvalidOwnerGroup(
                "An owner group needs at least one owner".to_string(),
            ));
        }

        for (position, owner) in self.owners.iter().enumerate() {
            if owner.name.is_blank() {
                return Err(PartyError::InvalidOwnerGroup(format!(
                    "Owner {} has no name",
                    position + 1
                )));
            }
            if owner.address.is_blank() {
                return Err(PartyError::InvalidOwnerGroup(format!(
                    "Owner {} ({}) has no address",
                    position + 1,
                    owner.display_name()
                )));
            }
        }

        let representatives = self
            .owners
            .iter()
            .filter(|owner| owner.party_type.is_some_and(|t| t.is_representative()))
            .count();

        match self.tenancy_type {
            TenancyType::Sole if self.owners.len() != 1 => Err(PartyError::InvalidOwnerGroup(
                format!("Sole ownership needs exactly one owner, found {}", self.owners.len()),
            )),
            TenancyType::Joint if self.owners.len() < 2 => Err(PartyError::InvalidOwnerGroup(
                "Joint tenancy needs at least two owners".to_string(),
            )),
            TenancyType::Common => match self.interest() {
                Some((numerator, denominator)) if numerator <= denominator => Ok(()),
                Some((numerator, denominator)) => Err(PartyError::InvalidOwnerGroup(format!(
                    "Interest {}/{} exceeds the whole",
                    numerator, denominator
                ))),
                None => Err(PartyError::InvalidOwnerGroup(
                    "Tenants in common need an interest".to_string(),
                )),
            },
            TenancyType::Na if representatives != self.owners.len() => {
                Err(PartyError::InvalidOwnerGroup(
                    "Only executors or administrators can hold an NA group".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Rewrites tenants-in-common interests over their least common denominator
///
/// `1/2` and `1/3` become `3/6` and `2/6`. Groups of another tenancy, or
/// without an interest, are left alone. Nothing changes if the common
/// denominator would not fit in a `u32`.
pub fn normalize_common_interest(groups: &mut [OwnerGroup]) {
    let common = groups
        .iter()
        .filter(|group| group.tenancy_type == TenancyType::Common)
        .filter_map(OwnerGroup::interest)
        .try_fold(1u64, |lcm, (_, denominator)| {
            let denominator = u64::from(denominator);
            let next = lcm / gcd(lcm, denominator) * denominator;
            u32::try_from(next).ok().map(u64::from)
        });

    let Some(common) = common else {
        return;
    };
    let Ok(common_denominator) = u32::try_from(common) else {
        return;
    };

    for group in groups
        .iter_mut()
        .filter(|group| group.tenancy_type == TenancyType::Common)
    {
        if let Some((numerator, denominator)) = group.interest() {
            let factor = common / u64::from(denominator);
            if let Ok(numerator) = u32::try_from(u64::from(numerator) * factor) {
                group.interest_numerator = Some(numerator);
                group.interest_denominator = Some(common_denominator);
            }
        }
    }
}
