//! Identity types for Mandap entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Common behavior for strongly-typed entity identifiers.
pub trait EntityIdType:
    Copy + Eq + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Wrap a raw UUID.
    fn new(uuid: Uuid) -> Self;

    /// Borrow the raw UUID.
    fn as_uuid(&self) -> Uuid;

    /// The all-zero identifier.
    fn nil() -> Self {
        Self::new(Uuid::nil())
    }
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl EntityIdType for $name {
            fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a booking.
    BookingId
);
define_entity_id!(
    /// Identifier of a guest.
    GuestId
);
define_entity_id!(
    /// Identifier of a team member.
    TeamMemberId
);
define_entity_id!(
    /// Identifier of an event assignment.
    AssignmentId
);
define_entity_id!(
    /// Identifier of a budget plan.
    BudgetPlanId
);

// ============================================================================
// ID GENERATION
// ============================================================================

/// Source of fresh entity identities.
///
/// The store asks the generator for one UUID per created entity. Generators
/// must never hand out the same value twice for the lifetime of a store.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Produce the next identity.
    fn next_uuid(&self) -> Uuid;

    /// Produce the next identity wrapped in a typed id.
    fn next_id<T: EntityIdType>(&self) -> T
    where
        Self: Sized,
    {
        T::new(self.next_uuid())
    }
}

/// UUIDv7 generator. IDs embed a Unix timestamp and sort by creation time.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_uuid(&self) -> Uuid {
        Uuid::now_v7()
    }
}

/// Monotonic counter generator for deterministic tests.
///
/// Produces `00000000-0000-0000-0000-000000000001`, `...02`, and so on.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `value`.
    pub fn starting_after(value: u64) -> Self {
        Self {
            next: AtomicU64::new(value),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_uuid(&self) -> Uuid {
        let value = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(value))
    }
}

/// Generate a new UUIDv7 identity of the requested type.
pub fn new_entity_id<T: EntityIdType>() -> T {
    T::new(Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_generator_counts_from_one() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_uuid(), Uuid::from_u128(1));
        assert_eq!(ids.next_uuid(), Uuid::from_u128(2));
        let typed: BookingId = ids.next_id();
        assert_eq!(typed.as_uuid(), Uuid::from_u128(3));
    }

    #[test]
    fn test_sequential_generator_starting_after() {
        let ids = SequentialIdGenerator::starting_after(41);
        assert_eq!(ids.next_uuid(), Uuid::from_u128(42));
    }

    #[test]
    fn test_uuid_v7_generator_unique() {
        let ids = UuidV7Generator;
        let seen: HashSet<Uuid> = (0..1000).map(|_| ids.next_uuid()).collect();
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_typed_id_display_and_parse() {
        let id: GuestId = new_entity_id();
        let parsed: GuestId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!(" not-a-uuid ".parse::<GuestId>().is_err());
    }

    #[test]
    fn test_typed_id_serializes_as_plain_string() {
        let id = TeamMemberId::new(Uuid::from_u128(7));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000007\"");
        assert!(TeamMemberId::nil().as_uuid().is_nil());
    }
}
