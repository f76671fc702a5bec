//! Enum types for Mandap entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FUNCTION TYPES
// ============================================================================

/// Kind of wedding function an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionType {
    Haldi,
    Mehendi,
    Sangeet,
    Wedding,
    Reception,
}

impl FunctionType {
    /// Every function type in ceremony order.
    pub const ALL: [FunctionType; 5] = [
        FunctionType::Haldi,
        FunctionType::Mehendi,
        FunctionType::Sangeet,
        FunctionType::Wedding,
        FunctionType::Reception,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionType::Haldi => "Haldi",
            FunctionType::Mehendi => "Mehendi",
            FunctionType::Sangeet => "Sangeet",
            FunctionType::Wedding => "Wedding",
            FunctionType::Reception => "Reception",
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown enum label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for FunctionType {
    type Err = ParseEnumError;

    /// Case-insensitive; accepts "mehndi" as an alternate spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haldi" => Ok(FunctionType::Haldi),
            "mehendi" | "mehndi" => Ok(FunctionType::Mehendi),
            "sangeet" => Ok(FunctionType::Sangeet),
            "wedding" => Ok(FunctionType::Wedding),
            "reception" => Ok(FunctionType::Reception),
            _ => Err(ParseEnumError {
                kind: "function type",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// STATUS ENUMS
// ============================================================================

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(ParseEnumError {
                kind: "booking status",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether a team member is currently taking assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::Active => f.write_str("active"),
            MemberStatus::Inactive => f.write_str("inactive"),
        }
    }
}

// ============================================================================
// STORAGE KEYS
// ============================================================================

/// Entity type discriminator used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Booking,
    Guest,
    TeamMember,
    Assignment,
    BudgetPlan,
}

/// Storage key of an entity collection.
///
/// Each collection is persisted as one serialized value under its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKey {
    #[serde(rename = "bookings")]
    Bookings,
    #[serde(rename = "guests")]
    Guests,
    #[serde(rename = "teamMembers")]
    TeamMembers,
    #[serde(rename = "assignments")]
    Assignments,
    #[serde(rename = "budgetPlans")]
    BudgetPlans,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 5] = [
        CollectionKey::Bookings,
        CollectionKey::Guests,
        CollectionKey::TeamMembers,
        CollectionKey::Assignments,
        CollectionKey::BudgetPlans,
    ];

    /// The backend key this collection lives under.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Bookings => "bookings",
            CollectionKey::Guests => "guests",
            CollectionKey::TeamMembers => "teamMembers",
            CollectionKey::Assignments => "assignments",
            CollectionKey::BudgetPlans => "budgetPlans",
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            CollectionKey::Bookings => EntityType::Booking,
            CollectionKey::Guests => EntityType::Guest,
            CollectionKey::TeamMembers => EntityType::TeamMember,
            CollectionKey::Assignments => EntityType::Assignment,
            CollectionKey::BudgetPlans => EntityType::BudgetPlan,
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker key written once sample data has been seeded.
pub const INIT_MARKER_KEY: &str = "dbInitialized";
