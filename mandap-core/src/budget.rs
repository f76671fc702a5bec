//! Budget arithmetic.

use crate::{AdditionalService, BudgetPlan, NewBudgetPlan};

/// Quick estimate: venue + decoration + food cost per guest times guests.
///
/// Saturates instead of overflowing.
pub fn estimate_budget(venue: u64, food_per_guest: u64, decoration: u64, guests: u64) -> u64 {
    venue
        .saturating_add(decoration)
        .saturating_add(food_per_guest.saturating_mul(guests))
}

/// Sum of additional service costs.
pub fn services_total(services: &[AdditionalService]) -> u64 {
    services
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(s.cost))
}

/// Estimate plus services plus miscellaneous.
fn plan_total(
    venue: u64,
    food_per_guest: u64,
    decoration: u64,
    guests: u64,
    services: &[AdditionalService],
    misc: u64,
) -> u64 {
    estimate_budget(venue, food_per_guest, decoration, guests)
        .saturating_add(services_total(services))
        .saturating_add(misc)
}

impl NewBudgetPlan {
    /// Full plan cost.
    pub fn total_cost(&self) -> u64 {
        plan_total(
            self.venue_cost,
            self.food_cost_per_guest,
            self.decoration_cost,
            self.expected_guests,
            &self.additional_services,
            self.misc_cost,
        )
    }
}

impl BudgetPlan {
    /// Total derived from the plan's current line items.
    pub fn computed_total(&self) -> u64 {
        plan_total(
            self.venue_cost,
            self.food_cost_per_guest,
            self.decoration_cost,
            self.expected_guests,
            &self.additional_services,
            self.misc_cost,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_entity_id, FunctionType};
    use chrono::Utc;
    use proptest::prelude::*;

    #[test]
    fn test_estimate_budget() {
        assert_eq!(estimate_budget(150_000, 1_200, 75_000, 250), 525_000);
        assert_eq!(estimate_budget(0, 0, 0, 0), 0);
    }

    #[test]
    fn test_estimate_budget_saturates() {
        assert_eq!(estimate_budget(1, u64::MAX, 0, 2), u64::MAX);
    }

    fn make_wedding_plan() -> NewBudgetPlan {
        NewBudgetPlan {
            event_type: FunctionType::Wedding,
            venue_name: "Royal Palace Hotel".to_string(),
            venue_cost: 150_000,
            food_cost_per_guest: 1_200,
            expected_guests: 250,
            decoration_cost: 75_000,
            decoration_type: Some("premium".to_string()),
            additional_services: vec![
                AdditionalService { name: "photography".to_string(), cost: 25_000 },
                AdditionalService { name: "dj".to_string(), cost: 15_000 },
            ],
            misc_cost: 30_000,
            misc_details: None,
        }
    }

    #[test]
    fn test_plan_total_includes_services_and_misc() {
        assert_eq!(make_wedding_plan().total_cost(), 595_000);
    }

    #[test]
    fn test_stored_plan_total_matches_input_total() {
        let input = make_wedding_plan();
        let mut plan = BudgetPlan {
            id: new_entity_id(),
            event_type: input.event_type,
            venue_name: input.venue_name.clone(),
            venue_cost: input.venue_cost,
            food_cost_per_guest: input.food_cost_per_guest,
            expected_guests: input.expected_guests,
            decoration_cost: input.decoration_cost,
            decoration_type: input.decoration_type.clone(),
            additional_services: input.additional_services.clone(),
            misc_cost: input.misc_cost,
            misc_details: None,
            total_cost: 0,
            created_at: Utc::now(),
        };
        assert_eq!(plan.computed_total(), input.total_cost());

        plan.expected_guests = u64::MAX;
        assert_eq!(plan.computed_total(), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_estimate_is_monotonic_in_guests(
            venue in 0u64..1_000_000,
            food in 0u64..10_000,
            decor in 0u64..1_000_000,
            guests in 0u64..10_000,
        ) {
            let base = estimate_budget(venue, food, decor, guests);
            let more = estimate_budget(venue, food, decor, guests + 1);
            prop_assert_eq!(more - base, food);
        }
    }
}
