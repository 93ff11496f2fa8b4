//! Duplicate party detection
//!
//! Two parties are equivalent when they are the same kind, their names match
//! after normalization, and their addresses match on street, city, region,
//! postal code, and country. A partial address match is never a duplicate.
//!
//! The check runs on submit only; it blocks the commit until the user edits
//! or cancels.

use crate::address::{collapse_whitespace, Address};
use crate::error::PartyError;
use crate::party::{Party, PartyName};

/// Trims, collapses inner whitespace, and lower-cases a name
pub fn normalize_name(value: &str) -> String {
    collapse_whitespace(value).to_lowercase()
}

/// Letters and digits of a postal code, lower-cased
fn compact_postal_code(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Street, city, region, postal code, and country in comparable form
fn comparable(address: &Address) -> [String; 5] {
    let address = address.normalized();
    [
        address.street.to_lowercase(),
        address.city.to_lowercase(),
        address.region.to_lowercase(),
        compact_postal_code(&address.postal_code),
        address.country.to_lowercase(),
    ]
}

/// Whether two addresses share street, city, region, postal code, and country
///
/// Both sides are compared in their submit-ready form, ignoring case. Spaces
/// and hyphens inside the postal code are ignored as well.
pub fn addresses_match(a: &Address, b: &Address) -> bool {
    comparable(a) == comparable(b)
}

fn names_match(a: &PartyName, b: &PartyName) -> bool {
    match (a, b) {
        (PartyName::PersonName(a), PartyName::PersonName(b)) => {
            normalize_name(&a.first) == normalize_name(&b.first)
                && normalize_name(a.middle.as_deref().unwrap_or(""))
                    == normalize_name(b.middle.as_deref().unwrap_or(""))
                && normalize_name(&a.last) == normalize_name(&b.last)
        }
        (PartyName::BusinessName(a), PartyName::BusinessName(b)) => {
            normalize_name(a) == normalize_name(b)
        }
        _ => false,
    }
}

/// Whether two parties are the same kind with matching name and address
pub fn is_equivalent(candidate: &Party, existing: &Party) -> bool {
    names_match(&candidate.name, &existing.name)
        && addresses_match(&candidate.address, &existing.address)
}

/// Index of the first party equivalent to `candidate`, skipping `exclude_index`
pub fn find_matching_party(
    candidate: &Party,
    parties: &[Party],
    exclude_index: Option<usize>,
) -> Option<usize> {
    parties
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude_index)
        .find(|(_, existing)| is_equivalent(candidate, existing))
        .map(|(index, _)| index)
}

/// Whether any party other than the one at `exclude_index` is equivalent
///
/// `exclude_index` is the position of the record being edited in place.
pub fn has_matching_party(
    candidate: &Party,
    parties: &[Party],
    exclude_index: Option<usize>,
) -> bool {
    find_matching_party(candidate, parties, exclude_index).is_some()
}

/// Fails with `DuplicateParty` when an equivalent party exists
pub fn ensure_unique(
    candidate: &Party,
    parties: &[Party],
    exclude_index: Option<usize>,
) -> Result<(), PartyError> {
    match find_matching_party(candidate, parties, exclude_index) {
        Some(index) => Err(PartyError::DuplicateParty(format!(
            "{} already appears as {} #{}",
            parties[index].display_name(),
            parties[index].role,
            index + 1
        ))),
        None => Ok(()),
    }
}
