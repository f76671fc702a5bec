//! Mandap Test Utilities
//!
//! Centralized test infrastructure for the Mandap workspace:
//! - Proptest generators for entity inputs
//! - Fixtures for common stores and records
//! - A change recorder for observing store notifications
//! - Custom assertions for Mandap-specific results

// Re-export storage types from their source crate
pub use mandap_storage::{
    ChangeEvent, EntityStore, InMemoryBackend, JsonFileBackend, KeyValueBackend, Subscription,
};

// Re-export core types for convenience
pub use mandap_core::{
    AdditionalService, Assignment, AssignmentId, Booking, BookingId, BookingStatus, BudgetPlan,
    CollectionKey, EntityIdType, Event, FunctionType, Guest, GuestId, MandapError, MandapResult,
    MemberStatus, NewBooking, NewBudgetPlan, NewGuest, NewTeamMember, SequentialIdGenerator,
    StorageError, TeamMember, TeamMemberId,
};

use std::sync::{Arc, Mutex};

// ============================================================================
// CHANGE RECORDER
// ============================================================================

/// Collects every change notification a store emits.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    events: Arc<Mutex<Vec<ChangeEvent>>>,
}

impl ChangeRecorder {
    /// Subscribe a new recorder to every collection of `store`.
    pub fn attach<B: KeyValueBackend>(store: &EntityStore<B>) -> (Self, Subscription) {
        let recorder = Self::default();
        let sink = recorder.clone();
        let subscription = store.subscribe_all(move |event| sink.push(event.clone()));
        (recorder, subscription)
    }

    fn push(&self, event: ChangeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Keys of recorded events, in delivery order.
    pub fn keys(&self) -> Vec<CollectionKey> {
        self.events().into_iter().map(|e| e.key).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Generate a function type.
    pub fn arb_function_type() -> impl Strategy<Value = FunctionType> {
        prop::sample::select(FunctionType::ALL.to_vec())
    }

    /// Generate a booking status.
    pub fn arb_booking_status() -> impl Strategy<Value = BookingStatus> {
        prop_oneof![
            Just(BookingStatus::Pending),
            Just(BookingStatus::Confirmed),
            Just(BookingStatus::Cancelled),
            Just(BookingStatus::Completed),
        ]
    }

    /// Generate a valid Indian mobile number.
    pub fn arb_mobile() -> impl Strategy<Value = String> {
        "[6-9][0-9]{9}"
    }

    /// Generate a person name.
    pub fn arb_name() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,10})?"
    }

    /// Generate a date in 2025-2030.
    pub fn arb_event_date() -> impl Strategy<Value = NaiveDate> {
        (2025i32..=2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
    }

    /// Generate an embedded event.
    pub fn arb_event() -> impl Strategy<Value = Event> {
        (arb_function_type(), "[A-Za-z ]{1,20}", arb_event_date())
            .prop_map(|(function_type, destination, date)| Event {
                function_type,
                destination,
                date,
            })
    }

    /// Generate booking input with one to five events.
    pub fn arb_new_booking() -> impl Strategy<Value = NewBooking> {
        (
            arb_name(),
            arb_name(),
            arb_mobile(),
            prop::collection::vec(arb_event(), 1..=5),
        )
            .prop_map(|(bride, groom, mobile, events)| NewBooking {
                bride,
                groom,
                mobile,
                events,
            })
    }

    /// Generate guest input.
    pub fn arb_new_guest() -> impl Strategy<Value = NewGuest> {
        arb_name().prop_map(|name| NewGuest { name })
    }

    /// Generate team member input.
    pub fn arb_new_team_member() -> impl Strategy<Value = NewTeamMember> {
        (arb_name(), prop::option::of("[A-Z][a-z]{2,12}"))
            .prop_map(|(name, role)| NewTeamMember { name, role })
    }

    /// Generate a budget plan input.
    pub fn arb_new_budget_plan() -> impl Strategy<Value = NewBudgetPlan> {
        (
            arb_function_type(),
            "[A-Za-z ]{1,20}",
            0u64..1_000_000,
            0u64..5_000,
            0u64..2_000,
            0u64..500_000,
            prop::collection::vec(("[a-z]{2,10}", 0u64..100_000), 0..4),
            0u64..100_000,
        )
            .prop_map(
                |(event_type, venue_name, venue, food, guests, decor, services, misc)| {
                    NewBudgetPlan {
                        event_type,
                        venue_name,
                        venue_cost: venue,
                        food_cost_per_guest: food,
                        expected_guests: guests,
                        decoration_cost: decor,
                        decoration_type: None,
                        additional_services: services
                            .into_iter()
                            .map(|(name, cost)| AdditionalService { name, cost })
                            .collect(),
                        misc_cost: misc,
                        misc_details: None,
                    }
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    /// Empty in-memory store with sequential identities.
    pub fn memory_store() -> EntityStore<InMemoryBackend> {
        EntityStore::in_memory().with_id_generator(Arc::new(SequentialIdGenerator::new()))
    }

    /// Parse `YYYY-MM-DD`. Panics on bad input.
    pub fn date(raw: &str) -> NaiveDate {
        raw.parse().expect("fixture date must be YYYY-MM-DD")
    }

    /// Single-event booking input.
    pub fn booking_with(bride: &str, groom: &str, function_type: FunctionType, on: &str) -> NewBooking {
        NewBooking {
            bride: bride.to_string(),
            groom: groom.to_string(),
            mobile: "9876543210".to_string(),
            events: vec![Event::new(function_type, "Green Valley Resort", date(on))],
        }
    }

    /// Mehendi plus Wedding booking input.
    pub fn two_event_booking() -> NewBooking {
        NewBooking {
            bride: "Anjali".to_string(),
            groom: "Rohit".to_string(),
            mobile: "9876543210".to_string(),
            events: vec![
                Event::new(FunctionType::Mehendi, "Green Valley Resort", date("2025-12-15")),
                Event::new(FunctionType::Wedding, "Royal Palace Hotel", date("2025-12-17")),
            ],
        }
    }

    pub fn member(name: &str) -> NewTeamMember {
        NewTeamMember {
            name: name.to_string(),
            role: None,
        }
    }

    pub fn guest(name: &str) -> NewGuest {
        NewGuest {
            name: name.to_string(),
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    use super::*;

    /// Assert that the result is Ok.
    pub fn assert_ok<T: std::fmt::Debug>(result: &MandapResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got {:?}", result);
    }

    /// Assert that an operation was rejected (`Ok(None)`).
    pub fn assert_rejected<T: std::fmt::Debug>(result: &MandapResult<Option<T>>) {
        match result {
            Ok(None) => {}
            other => panic!("Expected rejection (Ok(None)), got {:?}", other),
        }
    }

    /// Assert that an operation succeeded with a value, and return it.
    pub fn assert_accepted<T: std::fmt::Debug + Clone>(result: &MandapResult<Option<T>>) -> T {
        match result {
            Ok(Some(value)) => value.clone(),
            other => panic!("Expected Ok(Some(_)), got {:?}", other),
        }
    }

    /// Assert that the result is a storage error.
    pub fn assert_storage_error<T: std::fmt::Debug>(result: &MandapResult<T>) {
        match result {
            Err(MandapError::Storage(_)) => {}
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }

    /// Assert that the result is a validation error.
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &MandapResult<T>) {
        match result {
            Err(MandapError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    /// Assert that no assignment references a missing booking or member.
    pub fn assert_referential_integrity<B: KeyValueBackend>(store: &EntityStore<B>) {
        let bookings = store.get_all_bookings().expect("bookings readable");
        let members = store.get_all_team_members().expect("team readable");
        for assignment in store.get_all_assignments().expect("assignments readable") {
            assert!(
                bookings.iter().any(|b| b.id == assignment.booking_id),
                "assignment {} references missing booking {}",
                assignment.id,
                assignment.booking_id
            );
            assert!(
                members.iter().any(|m| m.id == assignment.team_member_id),
                "assignment {} references missing member {}",
                assignment.id,
                assignment.team_member_id
            );
        }
    }
}
