//! Command-line surface and command execution.

use crate::error::CliError;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use mandap_core::{
    estimate_budget, format_event_date, format_rupees, AssignmentId, BookingId, Event,
    FunctionType, GuestId, NewBooking, NewGuest, NewTeamMember, TeamMemberId,
};
use mandap_storage::{EntityStore, KeyValueBackend};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mandap")]
#[command(about = "Wedding booking store")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "MANDAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Collection selected by `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    Bookings,
    Guests,
    Team,
    Assignments,
    Budgets,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Seed sample data into an empty store
    Seed,
    /// Wipe every collection and reseed
    Reset,
    List {
        #[arg(value_enum)]
        target: ListTarget,
    },
    AddGuest {
        name: String,
    },
    AddMember {
        name: String,
        role: Option<String>,
    },
    AddBooking {
        bride: String,
        groom: String,
        mobile: String,
        /// Function,YYYY-MM-DD,Destination
        #[arg(required = true, value_parser = parse_event)]
        events: Vec<Event>,
    },
    Assign {
        booking_id: BookingId,
        event_type: FunctionType,
        team_member_id: TeamMemberId,
    },
    Unassign {
        assignment_id: AssignmentId,
    },
    DeleteBooking {
        booking_id: BookingId,
    },
    DeleteGuest {
        guest_id: GuestId,
    },
    DeleteMember {
        member_id: TeamMemberId,
    },
    /// Quick estimate; amounts may use digit grouping commas
    Budget {
        #[arg(value_parser = parse_amount)]
        venue: u64,
        #[arg(value_parser = parse_amount)]
        food_per_guest: u64,
        #[arg(value_parser = parse_amount)]
        decoration: u64,
        #[arg(value_parser = parse_amount)]
        guests: u64,
    },
}

fn parse_amount(raw: &str) -> Result<u64, String> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| format!("expected a whole number, got '{}'", raw))
}

/// Parse `Function,YYYY-MM-DD,Destination`.
fn parse_event(raw: &str) -> Result<Event, String> {
    let mut parts = raw.splitn(3, ',');
    let (Some(function), Some(date), Some(destination)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "event '{}' must look like Function,YYYY-MM-DD,Destination",
            raw
        ));
    };
    let function_type = function.trim().parse::<FunctionType>().map_err(|e| e.to_string())?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", date.trim(), e))?;
    Ok(Event::new(function_type, destination.trim(), date))
}

impl Command {
    /// Run against `store`, returning the text to print.
    pub fn execute<B: KeyValueBackend>(self, store: &EntityStore<B>) -> Result<String, CliError> {
        match self {
            Command::Seed => Ok(if store.init()? {
                "sample data seeded".to_string()
            } else {
                "store already initialized".to_string()
            }),
            Command::Reset => {
                store.clear_database()?;
                Ok("database reset to sample data".to_string())
            }
            Command::List { target } => render_list(store, target),
            Command::AddGuest { name } => {
                let new = NewGuest { name };
                new.validate()?;
                let guest = store
                    .add_guest(new)?
                    .ok_or_else(|| CliError::Rejected("guest not stored".to_string()))?;
                Ok(format!("added guest {} ({})", guest.name, guest.id))
            }
            Command::AddMember { name, role } => {
                let new = NewTeamMember { name, role };
                new.validate()?;
                let name = new.name.clone();
                let member = store.add_team_member(new)?.ok_or_else(|| {
                    CliError::Rejected(format!("a team member named '{}' already exists", name))
                })?;
                Ok(format!("added team member {} ({})", member.name, member.id))
            }
            Command::AddBooking {
                bride,
                groom,
                mobile,
                events,
            } => {
                let new = NewBooking {
                    bride,
                    groom,
                    mobile,
                    events,
                };
                new.validate()?;
                let booking = store
                    .add_booking(new)?
                    .ok_or_else(|| CliError::Rejected("booking not stored".to_string()))?;
                Ok(format!("added booking {} ({})", booking.party_name(), booking.id))
            }
            Command::Assign {
                booking_id,
                event_type,
                team_member_id,
            } => {
                let assignment = store
                    .assign_event(booking_id, event_type, team_member_id)?
                    .ok_or_else(|| {
                        CliError::Rejected(format!(
                            "cannot assign {}: unknown booking, unknown member, or no {} event",
                            event_type, event_type
                        ))
                    })?;
                Ok(format!(
                    "assigned {} to {} of {} on {} ({})",
                    assignment.member_name,
                    assignment.event_type,
                    assignment.booking_name,
                    format_event_date(assignment.date),
                    assignment.id
                ))
            }
            Command::Unassign { assignment_id } => {
                store.remove_assignment(assignment_id)?;
                Ok(format!("removed assignment {}", assignment_id))
            }
            Command::DeleteBooking { booking_id } => {
                store.delete_booking(booking_id)?;
                Ok(format!("deleted booking {} and its assignments", booking_id))
            }
            Command::DeleteGuest { guest_id } => {
                store.delete_guest(guest_id)?;
                Ok(format!("deleted guest {}", guest_id))
            }
            Command::DeleteMember { member_id } => {
                store.delete_team_member(member_id)?;
                Ok(format!("deleted team member {} and their assignments", member_id))
            }
            Command::Budget {
                venue,
                food_per_guest,
                decoration,
                guests,
            } => {
                let total = estimate_budget(venue, food_per_guest, decoration, guests);
                Ok(format!(
                    "estimated total: {} (food {} x {} guests)",
                    format_rupees(total),
                    format_rupees(food_per_guest),
                    guests
                ))
            }
        }
    }
}

fn render_list<B: KeyValueBackend>(
    store: &EntityStore<B>,
    target: ListTarget,
) -> Result<String, CliError> {
    let mut lines = Vec::new();
    match target {
        ListTarget::Bookings => {
            for booking in store.get_all_bookings()? {
                lines.push(format!(
                    "{}  {}  {}  {}",
                    booking.id,
                    booking.party_name(),
                    booking.mobile,
                    booking.status
                ));
                lines.extend(booking.events.iter().map(|event| {
                    format!(
                        "    {:<9} {}  {}",
                        event.function_type.as_str(),
                        format_event_date(event.date),
                        event.destination
                    )
                }));
            }
        }
        ListTarget::Guests => {
            lines.extend(
                store
                    .get_all_guests()?
                    .into_iter()
                    .map(|guest| format!("{}  {}", guest.id, guest.name)),
            );
        }
        ListTarget::Team => {
            lines.extend(store.get_all_team_members()?.into_iter().map(|member| {
                format!(
                    "{}  {}  {}  {}",
                    member.id,
                    member.name,
                    member.role.as_deref().unwrap_or("-"),
                    member.status
                )
            }));
        }
        ListTarget::Assignments => {
            lines.extend(store.get_all_assignments()?.into_iter().map(|assignment| {
                format!(
                    "{}  {}  {}  {}  {}",
                    assignment.id,
                    assignment.booking_name,
                    assignment.event_type,
                    format_event_date(assignment.date),
                    assignment.member_name
                )
            }));
        }
        ListTarget::Budgets => {
            lines.extend(store.get_all_budget_plans()?.into_iter().map(|plan| {
                format!(
                    "{}  {}  {}  {}",
                    plan.id,
                    plan.event_type,
                    plan.venue_name,
                    format_rupees(plan.total_cost)
                )
            }));
        }
    }
    if lines.is_empty() {
        lines.push("(none)".to_string());
    }
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}
