//! The entity store: typed collections over a key-value backend.
//!
//! Every write replaces the whole affected collection under its key and then
//! notifies observers. Read-modify-write sequences are not atomic; the store
//! assumes a single writer.

use crate::backend::{InMemoryBackend, KeyValueBackend};
use crate::notify::{ChangeEvent, ChangeNotifier, Subscription};
use crate::{AssignmentUpdate, BookingUpdate, BudgetPlanUpdate, GuestUpdate, TeamMemberUpdate};
use chrono::Utc;
use mandap_core::{
    Assignment, AssignmentId, Booking, BookingId, BookingStatus, BudgetPlan, BudgetPlanId,
    CollectionKey, EntityIdType, FunctionType, Guest, GuestId, IdGenerator, MandapResult,
    MemberStatus, NewBooking, NewBudgetPlan, NewGuest, NewTeamMember, StorageError, TeamMember,
    TeamMemberId, UuidV7Generator,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// COLLECTION ENTITY TRAIT
// ============================================================================

/// A record type stored as one collection under a fixed key.
pub trait CollectionEntity: Clone + Serialize + DeserializeOwned {
    type Id: EntityIdType;

    /// Key of the collection holding this type.
    const COLLECTION: CollectionKey;

    fn id(&self) -> Self::Id;
}

impl CollectionEntity for Booking {
    type Id = BookingId;
    const COLLECTION: CollectionKey = CollectionKey::Bookings;

    fn id(&self) -> BookingId {
        self.id
    }
}

impl CollectionEntity for Guest {
    type Id = GuestId;
    const COLLECTION: CollectionKey = CollectionKey::Guests;

    fn id(&self) -> GuestId {
        self.id
    }
}

impl CollectionEntity for TeamMember {
    type Id = TeamMemberId;
    const COLLECTION: CollectionKey = CollectionKey::TeamMembers;

    fn id(&self) -> TeamMemberId {
        self.id
    }
}

impl CollectionEntity for Assignment {
    type Id = AssignmentId;
    const COLLECTION: CollectionKey = CollectionKey::Assignments;

    fn id(&self) -> AssignmentId {
        self.id
    }
}

impl CollectionEntity for BudgetPlan {
    type Id = BudgetPlanId;
    const COLLECTION: CollectionKey = CollectionKey::BudgetPlans;

    fn id(&self) -> BudgetPlanId {
        self.id
    }
}

// ============================================================================
// ENTITY STORE
// ============================================================================

/// Repository over an injected key-value backend.
///
/// Not-found lookups and constraint rejections return `Ok(None)`. `Err` is
/// reserved for backend failures and unreadable stored data.
#[derive(Debug, Clone)]
pub struct EntityStore<B = InMemoryBackend> {
    backend: B,
    notifier: ChangeNotifier,
    ids: Arc<dyn IdGenerator>,
}

impl EntityStore<InMemoryBackend> {
    /// Store over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }
}

impl<B: KeyValueBackend> EntityStore<B> {
    /// Create a store over `backend` using UUIDv7 identities.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            notifier: ChangeNotifier::new(),
            ids: Arc::new(UuidV7Generator),
        }
    }

    /// Replace the identity source.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Observe writes to one collection.
    pub fn subscribe<F>(&self, key: CollectionKey, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(key, callback)
    }

    /// Observe writes to every collection.
    pub fn subscribe_all<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe_all(callback)
    }

    fn next_id<T: EntityIdType>(&self) -> T {
        T::new(self.ids.next_uuid())
    }

    // === Generic collection access ===

    /// Whole collection in insertion order. An absent key is an empty collection.
    pub fn get_all<T: CollectionEntity>(&self) -> MandapResult<Vec<T>> {
        let key = T::COLLECTION;
        match self.backend.get(key.as_str())? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                StorageError::CorruptData {
                    key: key.as_str().to_string(),
                    reason: e.to_string(),
                }
                .into()
            }),
        }
    }

    /// Single record by identity.
    pub fn get<T: CollectionEntity>(&self, id: T::Id) -> MandapResult<Option<T>> {
        Ok(self.get_all::<T>()?.into_iter().find(|item| item.id() == id))
    }

    /// Replace the stored collection and notify observers.
    fn write_collection<T: CollectionEntity>(&self, items: &[T]) -> MandapResult<()> {
        let key = T::COLLECTION;
        let value = serde_json::to_value(items).map_err(|e| StorageError::Serialization {
            entity_type: key.entity_type(),
            reason: e.to_string(),
        })?;
        self.backend.set(key.as_str(), value.to_string())?;
        tracing::debug!(key = %key, count = items.len(), "collection written");
        self.notifier.notify(&ChangeEvent { key, value });
        Ok(())
    }

    fn append<T: CollectionEntity>(&self, item: T) -> MandapResult<T> {
        let mut items = self.get_all::<T>()?;
        items.push(item.clone());
        self.write_collection(&items)?;
        Ok(item)
    }

    /// Drop every record matching `predicate`. Writes even when nothing matched.
    fn remove_where<T, F>(&self, predicate: F) -> MandapResult<usize>
    where
        T: CollectionEntity,
        F: Fn(&T) -> bool,
    {
        let mut items = self.get_all::<T>()?;
        let before = items.len();
        items.retain(|item| !predicate(item));
        let removed = before - items.len();
        self.write_collection(&items)?;
        Ok(removed)
    }

    /// Apply `merge` to the record with `id`. `merge` may veto by returning false.
    fn update_where<T, F>(&self, id: T::Id, merge: F) -> MandapResult<Option<T>>
    where
        T: CollectionEntity,
        F: FnOnce(&mut T, &[T]) -> bool,
    {
        let mut items = self.get_all::<T>()?;
        let Some(index) = items.iter().position(|item| item.id() == id) else {
            tracing::debug!(key = %T::COLLECTION, id = %id, "update target not found");
            return Ok(None);
        };
        let mut merged = items[index].clone();
        if !merge(&mut merged, &items) {
            return Ok(None);
        }
        items[index] = merged.clone();
        self.write_collection(&items)?;
        Ok(Some(merged))
    }

    // === Bookings ===

    pub fn get_all_bookings(&self) -> MandapResult<Vec<Booking>> {
        self.get_all()
    }

    pub fn get_booking(&self, id: BookingId) -> MandapResult<Option<Booking>> {
        self.get(id)
    }

    /// Store a new booking with status `pending`.
    pub fn add_booking(&self, new: NewBooking) -> MandapResult<Option<Booking>> {
        let booking = Booking {
            id: self.next_id(),
            bride: new.bride,
            groom: new.groom,
            mobile: new.mobile,
            events: new.events,
            created_at: Utc::now(),
            status: BookingStatus::Pending,
        };
        self.append(booking).map(Some)
    }

    pub fn update_booking(
        &self,
        id: BookingId,
        update: BookingUpdate,
    ) -> MandapResult<Option<Booking>> {
        self.update_where(id, |booking: &mut Booking, _| {
            if let Some(bride) = update.bride {
                booking.bride = bride;
            }
            if let Some(groom) = update.groom {
                booking.groom = groom;
            }
            if let Some(mobile) = update.mobile {
                booking.mobile = mobile;
            }
            if let Some(events) = update.events {
                booking.events = events;
            }
            if let Some(status) = update.status {
                booking.status = status;
            }
            true
        })
    }

    /// Remove a booking and every assignment that references it.
    pub fn delete_booking(&self, id: BookingId) -> MandapResult<()> {
        let removed = self.remove_where(|b: &Booking| b.id == id)?;
        let cascaded = self.remove_where(|a: &Assignment| a.booking_id == id)?;
        tracing::debug!(booking_id = %id, removed, cascaded, "booking deleted");
        Ok(())
    }

    // === Guests ===

    pub fn get_all_guests(&self) -> MandapResult<Vec<Guest>> {
        self.get_all()
    }

    pub fn get_guest(&self, id: GuestId) -> MandapResult<Option<Guest>> {
        self.get(id)
    }

    pub fn add_guest(&self, new: NewGuest) -> MandapResult<Option<Guest>> {
        let guest = Guest {
            id: self.next_id(),
            name: new.name,
            created_at: Utc::now(),
        };
        self.append(guest).map(Some)
    }

    pub fn update_guest(&self, id: GuestId, update: GuestUpdate) -> MandapResult<Option<Guest>> {
        self.update_where(id, |guest: &mut Guest, _| {
            if let Some(name) = update.name {
                guest.name = name;
            }
            true
        })
    }

    pub fn delete_guest(&self, id: GuestId) -> MandapResult<()> {
        self.remove_where(|g: &Guest| g.id == id)?;
        Ok(())
    }

    // === Team members ===

    pub fn get_all_team_members(&self) -> MandapResult<Vec<TeamMember>> {
        self.get_all()
    }

    pub fn get_team_member(&self, id: TeamMemberId) -> MandapResult<Option<TeamMember>> {
        self.get(id)
    }

    /// Store a new active team member. Returns `None` if the name is taken.
    pub fn add_team_member(&self, new: NewTeamMember) -> MandapResult<Option<TeamMember>> {
        let mut members = self.get_all::<TeamMember>()?;
        if members.iter().any(|m| m.name == new.name) {
            tracing::debug!(name = %new.name, "team member rejected: duplicate name");
            return Ok(None);
        }
        let member = TeamMember {
            id: self.next_id(),
            name: new.name,
            role: new.role,
            status: MemberStatus::Active,
            joined_at: Utc::now(),
        };
        members.push(member.clone());
        self.write_collection(&members)?;
        Ok(Some(member))
    }

    /// Merge fields into a member. Renaming onto another member's name is rejected.
    pub fn update_team_member(
        &self,
        id: TeamMemberId,
        update: TeamMemberUpdate,
    ) -> MandapResult<Option<TeamMember>> {
        self.update_where(id, |member: &mut TeamMember, all| {
            if let Some(name) = update.name {
                if all.iter().any(|m| m.id != member.id && m.name == name) {
                    tracing::debug!(name = %name, "team member rename rejected: duplicate name");
                    return false;
                }
                member.name = name;
            }
            if let Some(role) = update.role {
                member.role = Some(role);
            }
            if let Some(status) = update.status {
                member.status = status;
            }
            true
        })
    }

    /// Remove a team member and every assignment given to them.
    pub fn delete_team_member(&self, id: TeamMemberId) -> MandapResult<()> {
        let removed = self.remove_where(|m: &TeamMember| m.id == id)?;
        let cascaded = self.remove_where(|a: &Assignment| a.team_member_id == id)?;
        tracing::debug!(team_member_id = %id, removed, cascaded, "team member deleted");
        Ok(())
    }

    // === Assignments ===

    pub fn get_all_assignments(&self) -> MandapResult<Vec<Assignment>> {
        self.get_all()
    }

    pub fn get_assignment(&self, id: AssignmentId) -> MandapResult<Option<Assignment>> {
        self.get(id)
    }

    /// Assignments referencing one booking.
    pub fn assignments_for_booking(&self, booking_id: BookingId) -> MandapResult<Vec<Assignment>> {
        Ok(self
            .get_all::<Assignment>()?
            .into_iter()
            .filter(|a| a.booking_id == booking_id)
            .collect())
    }

    /// Assign a team member to one of a booking's events.
    ///
    /// Returns `None` when the booking or member does not exist, or when the
    /// booking has no event of `event_type`.
    pub fn assign_event(
        &self,
        booking_id: BookingId,
        event_type: FunctionType,
        team_member_id: TeamMemberId,
    ) -> MandapResult<Option<Assignment>> {
        let Some(booking) = self.get::<Booking>(booking_id)? else {
            tracing::debug!(booking_id = %booking_id, "assignment rejected: unknown booking");
            return Ok(None);
        };
        let Some(member) = self.get::<TeamMember>(team_member_id)? else {
            tracing::debug!(team_member_id = %team_member_id, "assignment rejected: unknown member");
            return Ok(None);
        };
        let Some(event) = booking.event(event_type) else {
            tracing::debug!(
                booking_id = %booking_id,
                event_type = %event_type,
                "assignment rejected: booking has no such event"
            );
            return Ok(None);
        };

        let assignment = Assignment {
            id: self.next_id(),
            booking_id,
            event_type,
            team_member_id,
            booking_name: booking.party_name(),
            member_name: member.name,
            date: event.date,
            created_at: Utc::now(),
        };
        self.append(assignment).map(Some)
    }

    /// Hand an assignment to another member, refreshing the copied member name.
    pub fn update_assignment(
        &self,
        id: AssignmentId,
        update: AssignmentUpdate,
    ) -> MandapResult<Option<Assignment>> {
        let new_member = match update.team_member_id {
            Some(member_id) => match self.get::<TeamMember>(member_id)? {
                Some(member) => Some(member),
                None => {
                    tracing::debug!(team_member_id = %member_id, "reassignment rejected: unknown member");
                    return Ok(None);
                }
            },
            None => None,
        };
        self.update_where(id, |assignment: &mut Assignment, _| {
            if let Some(member) = new_member {
                assignment.team_member_id = member.id;
                assignment.member_name = member.name;
            }
            true
        })
    }

    pub fn delete_assignment(&self, id: AssignmentId) -> MandapResult<()> {
        self.remove_where(|a: &Assignment| a.id == id)?;
        Ok(())
    }

    /// Same as `delete_assignment`.
    pub fn remove_assignment(&self, id: AssignmentId) -> MandapResult<()> {
        self.delete_assignment(id)
    }

    // === Budget plans ===

    pub fn get_all_budget_plans(&self) -> MandapResult<Vec<BudgetPlan>> {
        self.get_all()
    }

    pub fn get_budget_plan(&self, id: BudgetPlanId) -> MandapResult<Option<BudgetPlan>> {
        self.get(id)
    }

    /// Store a plan with its total computed from the line items.
    pub fn add_budget_plan(&self, new: NewBudgetPlan) -> MandapResult<Option<BudgetPlan>> {
        let total_cost = new.total_cost();
        let plan = BudgetPlan {
            id: self.next_id(),
            event_type: new.event_type,
            venue_name: new.venue_name,
            venue_cost: new.venue_cost,
            food_cost_per_guest: new.food_cost_per_guest,
            expected_guests: new.expected_guests,
            decoration_cost: new.decoration_cost,
            decoration_type: new.decoration_type,
            additional_services: new.additional_services,
            misc_cost: new.misc_cost,
            misc_details: new.misc_details,
            total_cost,
            created_at: Utc::now(),
        };
        self.append(plan).map(Some)
    }

    /// Merge fields into a plan and recompute its total.
    pub fn update_budget_plan(
        &self,
        id: BudgetPlanId,
        update: BudgetPlanUpdate,
    ) -> MandapResult<Option<BudgetPlan>> {
        self.update_where(id, |plan: &mut BudgetPlan, _| {
            if let Some(event_type) = update.event_type {
                plan.event_type = event_type;
            }
            if let Some(venue_name) = update.venue_name {
                plan.venue_name = venue_name;
            }
            if let Some(venue_cost) = update.venue_cost {
                plan.venue_cost = venue_cost;
            }
            if let Some(food) = update.food_cost_per_guest {
                plan.food_cost_per_guest = food;
            }
            if let Some(guests) = update.expected_guests {
                plan.expected_guests = guests;
            }
            if let Some(decoration_cost) = update.decoration_cost {
                plan.decoration_cost = decoration_cost;
            }
            if let Some(decoration_type) = update.decoration_type {
                plan.decoration_type = Some(decoration_type);
            }
            if let Some(services) = update.additional_services {
                plan.additional_services = services;
            }
            if let Some(misc_cost) = update.misc_cost {
                plan.misc_cost = misc_cost;
            }
            if let Some(misc_details) = update.misc_details {
                plan.misc_details = Some(misc_details);
            }
            plan.total_cost = plan.computed_total();
            true
        })
    }

    pub fn delete_budget_plan(&self, id: BudgetPlanId) -> MandapResult<()> {
        self.remove_where(|p: &BudgetPlan| p.id == id)?;
        Ok(())
    }
}
