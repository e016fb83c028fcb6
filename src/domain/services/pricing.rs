use crate::domain::models::event::{Event, PAYMENT_TYPE_DONATION, PAYMENT_TYPE_FREE, PAYMENT_TYPE_PAID};
use crate::domain::models::registration::{PAYMENT_DONATION, PAYMENT_FREE, PAYMENT_ONLINE_PENDING, PAYMENT_VENUE};
use crate::error::AppError;

pub const METHOD_VENUE: &str = "venue";
pub const METHOD_ONLINE: &str = "online";

/// Amount owed for a new registration, snapshotted from the event's price
/// at creation time. Donation events collect at the venue, so they carry a
/// zero amount like free ones.
pub fn total_amount(event: &Event, tickets: i32) -> i64 {
    match event.payment_type.as_str() {
        PAYMENT_TYPE_PAID => event.price * tickets as i64,
        _ => 0,
    }
}

/// Initial payment status for a registration. Paid events require the
/// registrant to pick a method; free and donation events ignore it.
pub fn initial_payment_status(event: &Event, method: Option<&str>) -> Result<String, AppError> {
    match event.payment_type.as_str() {
        PAYMENT_TYPE_FREE => Ok(PAYMENT_FREE.to_string()),
        PAYMENT_TYPE_DONATION => Ok(PAYMENT_DONATION.to_string()),
        PAYMENT_TYPE_PAID => match method {
            Some(METHOD_VENUE) => Ok(PAYMENT_VENUE.to_string()),
            Some(METHOD_ONLINE) => Ok(PAYMENT_ONLINE_PENDING.to_string()),
            Some(other) => Err(AppError::Validation(format!("Unknown payment method: {}", other))),
            None => Err(AppError::Validation("A payment method (venue or online) is required for paid events".into())),
        },
        other => Err(AppError::Validation(format!("Unknown event payment type: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::{Event, NewEventParams};
    use chrono::{Duration, Utc};

    fn event_with(payment_type: &str, price: i64) -> Event {
        let now = Utc::now();
        Event::new(NewEventParams {
            title: "Workshop".into(),
            description: "".into(),
            location: "Hub".into(),
            start_at: now + Duration::days(3),
            end_at: now + Duration::days(3) + Duration::hours(4),
            price,
            currency: "RSD".into(),
            payment_type: payment_type.into(),
            max_registrations: Some(20),
            registration_enabled: true,
            registration_deadline: None,
        })
    }

    #[test]
    fn paid_event_amount_scales_with_tickets() {
        let event = event_with(PAYMENT_TYPE_PAID, 1500);
        assert_eq!(total_amount(&event, 3), 4500);
    }

    #[test]
    fn free_and_donation_events_cost_nothing() {
        assert_eq!(total_amount(&event_with(PAYMENT_TYPE_FREE, 1500), 3), 0);
        assert_eq!(total_amount(&event_with(PAYMENT_TYPE_DONATION, 1500), 3), 0);
    }

    #[test]
    fn payment_status_follows_event_type() {
        assert_eq!(initial_payment_status(&event_with(PAYMENT_TYPE_FREE, 0), None).unwrap(), PAYMENT_FREE);
        assert_eq!(initial_payment_status(&event_with(PAYMENT_TYPE_DONATION, 0), None).unwrap(), PAYMENT_DONATION);
        assert_eq!(
            initial_payment_status(&event_with(PAYMENT_TYPE_PAID, 100), Some(METHOD_VENUE)).unwrap(),
            PAYMENT_VENUE
        );
        assert_eq!(
            initial_payment_status(&event_with(PAYMENT_TYPE_PAID, 100), Some(METHOD_ONLINE)).unwrap(),
            PAYMENT_ONLINE_PENDING
        );
    }

    #[test]
    fn paid_event_requires_a_method() {
        assert!(initial_payment_status(&event_with(PAYMENT_TYPE_PAID, 100), None).is_err());
        assert!(initial_payment_status(&event_with(PAYMENT_TYPE_PAID, 100), Some("crypto")).is_err());
    }
}
