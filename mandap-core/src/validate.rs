//! Input validation for entity field bundles.
//!
//! The store accepts unvalidated input. Front ends call these checks before
//! handing a form's fields to an add operation.

use crate::{MandapResult, NewBooking, NewGuest, NewTeamMember, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Indian mobile numbers: ten digits starting with 6-9.
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("valid regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub fn validate_mobile(mobile: &str) -> MandapResult<()> {
    if MOBILE_RE.is_match(mobile) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "mobile".to_string(),
            reason: format!("'{}' is not a 10-digit mobile number starting with 6-9", mobile),
        }
        .into())
    }
}

pub fn validate_email(email: &str) -> MandapResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "email".to_string(),
            reason: format!("'{}' is not an email address", email),
        }
        .into())
    }
}

fn require_text(field: &str, value: &str) -> MandapResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

impl NewBooking {
    /// Check names, mobile number and events.
    pub fn validate(&self) -> MandapResult<()> {
        require_text("bride", &self.bride)?;
        require_text("groom", &self.groom)?;
        validate_mobile(&self.mobile)?;
        if self.events.is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "events".to_string(),
            }
            .into());
        }
        for (i, event) in self.events.iter().enumerate() {
            require_text(&format!("events[{}].destination", i), &event.destination)?;
        }
        Ok(())
    }
}

impl NewGuest {
    pub fn validate(&self) -> MandapResult<()> {
        require_text("name", &self.name)
    }
}

impl NewTeamMember {
    pub fn validate(&self) -> MandapResult<()> {
        require_text("name", &self.name)
    }
}
