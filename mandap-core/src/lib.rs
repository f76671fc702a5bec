//! Mandap Core - Entity Types
//!
//! Data structures shared by every Mandap crate: typed identities, entity
//! records, enums, errors, validation and budget helpers. No I/O lives here.

mod budget;
mod config;
mod entities;
mod enums;
mod error;
mod format;
mod identity;
mod validate;

pub use budget::{estimate_budget, services_total};
pub use config::{BackendKind, MandapConfig, StorageConfig};
pub use entities::{
    AdditionalService, Assignment, Booking, BudgetPlan, Event, Guest, NewBooking, NewBudgetPlan,
    NewGuest, NewTeamMember, TeamMember,
};
pub use enums::{
    BookingStatus, CollectionKey, EntityType, FunctionType, MemberStatus, ParseEnumError,
    INIT_MARKER_KEY,
};
pub use error::{ConfigError, MandapError, MandapResult, StorageError, ValidationError};
pub use format::{format_event_date, format_rupees};
pub use identity::{
    new_entity_id, AssignmentId, BookingId, BudgetPlanId, EntityIdType, GuestId, IdGenerator,
    SequentialIdGenerator, TeamMemberId, Timestamp, UuidV7Generator,
};
pub use validate::{validate_email, validate_mobile};
