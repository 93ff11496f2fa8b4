//! Strongly-typed identifiers for filing entities
//!
//! Each identifier is a UUID newtype with a short display prefix, so a
//! `PartyId` can never be passed where a `FilingId` is expected and log lines
//! say which kind of record they refer to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Display prefix, e.g. `PTY`
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new_v7()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts both the prefixed display form and a bare UUID.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// A party listed on a filing (registering party, secured party, debtor, owner)
    PartyId,
    "PTY"
);

define_id!(
    /// A registration filing that owns a party collection
    FilingId,
    "FIL"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_display() {
        let id = PartyId::new_v7();
        assert!(id.to_string().starts_with("PTY-"));
    }

    #[test]
    fn test_filing_id_parsing() {
        let original = FilingId::new_v7();
        let parsed: FilingId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_bare_uuid_parses() {
        let uuid = Uuid::new_v4();
        let parsed: PartyId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }
}
