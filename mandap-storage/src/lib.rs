//! Mandap Storage - Entity Store and Backends
//!
//! The local entity store for bookings, guests, team members, assignments and
//! budget plans. Each collection is one serialized value in a key-value
//! backend; the store keeps references between collections consistent and
//! notifies observers after every write.

pub mod backend;
pub mod file_backend;
pub mod notify;
mod seed;
pub mod store;

pub use backend::{InMemoryBackend, KeyValueBackend};
pub use file_backend::JsonFileBackend;
pub use notify::{ChangeCallback, ChangeEvent, ChangeNotifier, Subscription};
pub use store::{CollectionEntity, EntityStore};

use mandap_core::{AdditionalService, BookingStatus, Event, FunctionType, MemberStatus, TeamMemberId};
use serde::{Deserialize, Serialize};

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Update payload for bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingUpdate {
    pub bride: Option<String>,
    pub groom: Option<String>,
    pub mobile: Option<String>,
    /// Replaces the whole event list
    pub events: Option<Vec<Event>>,
    pub status: Option<BookingStatus>,
}

/// Update payload for guests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestUpdate {
    pub name: Option<String>,
}

/// Update payload for team members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMemberUpdate {
    /// Must not collide with another member's name
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<MemberStatus>,
}

/// Update payload for assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentUpdate {
    /// Reassign to another existing member
    pub team_member_id: Option<TeamMemberId>,
}

/// Update payload for budget plans. The total is recomputed after merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetPlanUpdate {
    pub event_type: Option<FunctionType>,
    pub venue_name: Option<String>,
    pub venue_cost: Option<u64>,
    pub food_cost_per_guest: Option<u64>,
    pub expected_guests: Option<u64>,
    pub decoration_cost: Option<u64>,
    pub decoration_type: Option<String>,
    pub additional_services: Option<Vec<AdditionalService>>,
    pub misc_cost: Option<u64>,
    pub misc_details: Option<String>,
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use mandap_core::{FunctionType, NewGuest, NewTeamMember};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Every added guest comes back, in order, with the returned identity.
        #[test]
        fn prop_added_guests_read_back(names in prop::collection::vec("[A-Za-z ]{1,12}", 0..8)) {
            let store = EntityStore::in_memory();
            let mut added = Vec::new();
            for name in &names {
                added.push(store.add_guest(NewGuest { name: name.clone() }).unwrap().unwrap());
            }
            let all = store.get_all_guests().unwrap();
            prop_assert_eq!(all, added);
        }

        /// Team member names stay unique whatever is inserted.
        #[test]
        fn prop_team_member_names_unique(names in prop::collection::vec("[a-c]{1,2}", 0..12)) {
            let store = EntityStore::in_memory();
            for name in &names {
                let _ = store.add_team_member(NewTeamMember { name: name.clone(), role: None }).unwrap();
            }
            let members = store.get_all_team_members().unwrap();
            let mut seen = std::collections::HashSet::new();
            for member in &members {
                prop_assert!(seen.insert(member.name.clone()), "duplicate name {}", member.name);
            }
            let distinct: std::collections::HashSet<_> = names.iter().collect();
            prop_assert_eq!(members.len(), distinct.len());
        }

        /// Assigning to an event type the booking lacks never writes.
        #[test]
        fn prop_assign_missing_event_rejected(idx in 0usize..5) {
            let store = EntityStore::in_memory();
            let present = FunctionType::ALL[idx];
            let absent = FunctionType::ALL[(idx + 1) % 5];
            let booking = store.add_booking(mandap_core::NewBooking {
                bride: "A".to_string(),
                groom: "B".to_string(),
                mobile: "9876543210".to_string(),
                events: vec![Event::new(present, "X", chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())],
            }).unwrap().unwrap();
            let member = store.add_team_member(NewTeamMember { name: "P".to_string(), role: None }).unwrap().unwrap();

            prop_assert!(store.assign_event(booking.id, absent, member.id).unwrap().is_none());
            prop_assert!(store.assign_event(booking.id, present, member.id).unwrap().is_some());
            prop_assert_eq!(store.get_all_assignments().unwrap().len(), 1);
        }
    }
}
