//! Core entity structures
//!
//! Serialized field names are camelCase so stored collections keep the
//! layout the browser front end reads.

use crate::{
    AssignmentId, BookingId, BookingStatus, BudgetPlanId, FunctionType, GuestId, MemberStatus,
    TeamMemberId, Timestamp,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// BOOKINGS
// ============================================================================

/// One function within a booking. Events have no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub function_type: FunctionType,
    pub destination: String,
    pub date: NaiveDate,
}

impl Event {
    pub fn new(function_type: FunctionType, destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            function_type,
            destination: destination.into(),
            date,
        }
    }
}

/// Booking - a couple's reservation covering one or more functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub bride: String,
    pub groom: String,
    pub mobile: String,
    /// Functions in the order they were entered.
    pub events: Vec<Event>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    /// Display name of the couple, e.g. `"Anjali & Rohit"`.
    pub fn party_name(&self) -> String {
        format!("{} & {}", self.bride, self.groom)
    }

    /// First embedded event of the given function type.
    pub fn event(&self, function_type: FunctionType) -> Option<&Event> {
        self.events.iter().find(|e| e.function_type == function_type)
    }
}

/// Input for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub bride: String,
    pub groom: String,
    pub mobile: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

// ============================================================================
// GUESTS
// ============================================================================

/// Guest - an entry on the guest list. Not linked to bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Input for creating a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuest {
    pub name: String,
}

// ============================================================================
// TEAM
// ============================================================================

/// TeamMember - staff who can be assigned to events. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: MemberStatus,
    pub joined_at: Timestamp,
}

/// Input for creating a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeamMember {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

// ============================================================================
// ASSIGNMENTS
// ============================================================================

/// Assignment - a team member handling one event of a booking.
///
/// `booking_name`, `member_name` and `date` are copied at creation time so
/// list views need no lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub booking_id: BookingId,
    pub event_type: FunctionType,
    pub team_member_id: TeamMemberId,
    pub booking_name: String,
    pub member_name: String,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

// ============================================================================
// BUDGET PLANS
// ============================================================================

/// Extra paid service attached to a budget plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalService {
    pub name: String,
    pub cost: u64,
}

/// BudgetPlan - a saved cost estimate. Money values are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub id: BudgetPlanId,
    pub event_type: FunctionType,
    pub venue_name: String,
    pub venue_cost: u64,
    pub food_cost_per_guest: u64,
    pub expected_guests: u64,
    pub decoration_cost: u64,
    #[serde(default)]
    pub decoration_type: Option<String>,
    #[serde(default)]
    pub additional_services: Vec<AdditionalService>,
    #[serde(default)]
    pub misc_cost: u64,
    #[serde(default)]
    pub misc_details: Option<String>,
    pub total_cost: u64,
    pub created_at: Timestamp,
}

/// Input for creating a budget plan. The total is computed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetPlan {
    pub event_type: FunctionType,
    pub venue_name: String,
    pub venue_cost: u64,
    pub food_cost_per_guest: u64,
    pub expected_guests: u64,
    pub decoration_cost: u64,
    #[serde(default)]
    pub decoration_type: Option<String>,
    #[serde(default)]
    pub additional_services: Vec<AdditionalService>,
    #[serde(default)]
    pub misc_cost: u64,
    #[serde(default)]
    pub misc_details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_entity_id, EntityIdType};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_booking() -> Booking {
        Booking {
            id: new_entity_id(),
            bride: "Anjali".to_string(),
            groom: "Rohit".to_string(),
            mobile: "9876543210".to_string(),
            events: vec![
                Event::new(FunctionType::Mehendi, "Green Valley Resort", date(2025, 12, 15)),
                Event::new(FunctionType::Wedding, "Royal Palace Hotel", date(2025, 12, 17)),
            ],
            created_at: Utc::now(),
            status: BookingStatus::Pending,
        }
    }

    #[test]
    fn test_booking_party_name() {
        assert_eq!(make_test_booking().party_name(), "Anjali & Rohit");
    }

    #[test]
    fn test_booking_event_lookup() {
        let booking = make_test_booking();
        let wedding = booking.event(FunctionType::Wedding).unwrap();
        assert_eq!(wedding.destination, "Royal Palace Hotel");
        assert!(booking.event(FunctionType::Haldi).is_none());
    }

    #[test]
    fn test_booking_serializes_camel_case() {
        let booking = make_test_booking();
        let value = serde_json::to_value(&booking).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["events"][0]["functionType"], "Mehendi");
        assert_eq!(value["events"][0]["date"], "2025-12-15");
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn test_booking_status_defaults_when_missing() {
        let json = serde_json::json!({
            "id": BookingId::nil().to_string(),
            "bride": "A",
            "groom": "B",
            "mobile": "9876543210",
            "events": [],
            "createdAt": "2025-01-01T00:00:00Z"
        });
        let booking: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_new_team_member_role_optional() {
        let member: NewTeamMember = serde_json::from_str(r#"{"name":"P"}"#).unwrap();
        assert_eq!(member.name, "P");
        assert!(member.role.is_none());
    }
}
