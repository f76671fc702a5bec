//! Sample data seeding and database reset.

use crate::backend::KeyValueBackend;
use crate::notify::ChangeEvent;
use crate::store::EntityStore;
use mandap_core::{
    AdditionalService, CollectionKey, Event, FunctionType, MandapResult, NewBooking,
    NewBudgetPlan, NewTeamMember, ValidationError, INIT_MARKER_KEY,
};
use chrono::NaiveDate;

fn sample_date(raw: &str) -> MandapResult<NaiveDate> {
    raw.parse().map_err(|e: chrono::ParseError| {
        ValidationError::InvalidValue {
            field: "date".to_string(),
            reason: format!("{}: {}", raw, e),
        }
        .into()
    })
}

fn sample_team() -> Vec<NewTeamMember> {
    [
        ("Rahul Singh", "Event Manager"),
        ("Priya Patel", "Decorator"),
        ("Amit Kumar", "Catering Manager"),
    ]
    .into_iter()
    .map(|(name, role)| NewTeamMember {
        name: name.to_string(),
        role: Some(role.to_string()),
    })
    .collect()
}

fn sample_booking() -> MandapResult<NewBooking> {
    Ok(NewBooking {
        bride: "Anjali Sharma".to_string(),
        groom: "Rohit Verma".to_string(),
        mobile: "9876543210".to_string(),
        events: vec![
            Event::new(FunctionType::Mehendi, "Green Valley Resort", sample_date("2025-12-15")?),
            Event::new(FunctionType::Wedding, "Royal Palace Hotel", sample_date("2025-12-17")?),
        ],
    })
}

fn sample_budget_plan() -> NewBudgetPlan {
    NewBudgetPlan {
        event_type: FunctionType::Wedding,
        venue_name: "Royal Palace Hotel".to_string(),
        venue_cost: 150_000,
        food_cost_per_guest: 1_200,
        expected_guests: 250,
        decoration_cost: 75_000,
        decoration_type: Some("premium".to_string()),
        additional_services: vec![
            AdditionalService {
                name: "photography".to_string(),
                cost: 25_000,
            },
            AdditionalService {
                name: "dj".to_string(),
                cost: 15_000,
            },
        ],
        misc_cost: 30_000,
        misc_details: Some("Transportation and accommodation".to_string()),
    }
}

impl<B: KeyValueBackend> EntityStore<B> {
    /// Whether sample data has been written to this backend.
    pub fn is_initialized(&self) -> MandapResult<bool> {
        Ok(self.backend().get(INIT_MARKER_KEY)?.is_some())
    }

    /// Seed sample data once. Returns true if seeding ran.
    ///
    /// Writes three team members, one two-event booking, one budget plan and
    /// an assignment of the decorator to the Mehendi, then sets the marker.
    pub fn init(&self) -> MandapResult<bool> {
        if self.is_initialized()? {
            return Ok(false);
        }
        tracing::info!("seeding sample data");

        let mut decorator = None;
        for new in sample_team() {
            let is_decorator = new.role.as_deref() == Some("Decorator");
            if let Some(member) = self.add_team_member(new)? {
                if is_decorator {
                    decorator = Some(member.id);
                }
            }
        }

        let booking = self.add_booking(sample_booking()?)?;
        self.add_budget_plan(sample_budget_plan())?;

        if let (Some(booking), Some(member_id)) = (booking, decorator) {
            self.assign_event(booking.id, FunctionType::Mehendi, member_id)?;
        }

        self.backend().set(INIT_MARKER_KEY, "true".to_string())?;
        tracing::info!("sample data seeded");
        Ok(true)
    }

    /// Wipe every key and seed sample data again.
    ///
    /// Observers of each collection receive an empty collection first.
    pub fn clear_database(&self) -> MandapResult<()> {
        self.backend().clear()?;
        tracing::info!("database cleared");
        for key in CollectionKey::ALL {
            self.notifier().notify(&ChangeEvent {
                key,
                value: serde_json::Value::Array(Vec::new()),
            });
        }
        self.init()?;
        Ok(())
    }
}
