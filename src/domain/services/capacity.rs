use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::domain::models::event::Event;
use crate::domain::services::event_time;
use crate::error::AppError;

/// Pure admission check. Fails closed: any condition that cannot be
/// positively verified rejects the registration.
///
/// This only answers "is there room right now" — the authoritative seat
/// reservation is the conditional UPDATE inside the registration create
/// transaction, so two racing callers can both pass here and still only
/// one of them wins the last seat.
pub fn can_register(event: &Event, tickets: i32, tz: Tz, now: DateTime<Utc>) -> Result<(), AppError> {
    if tickets < 1 {
        return Err(AppError::Validation("Ticket count must be at least 1".into()));
    }

    if !event.registration_enabled {
        return Err(AppError::RegistrationClosed("registration is disabled for this event".into()));
    }

    if let Some(deadline) = event.registration_deadline {
        if event_time::deadline_passed(deadline, tz, now) {
            return Err(AppError::RegistrationClosed("the registration deadline has passed".into()));
        }
    }

    if event_time::event_ended(event.end_at, tz, now) {
        return Err(AppError::RegistrationClosed("the event has already ended".into()));
    }

    // max_registrations unset means unlimited capacity.
    if let Some(available) = event.available_seats() {
        if available < tickets {
            return Err(AppError::CapacityExhausted);
        }
    }

    Ok(())
}
