use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Single home for every deadline and "is this event past" comparison.
/// The platform pins one zone for all of them so that clients in different
/// timezones agree on when a registration window closes.
pub fn zone(name: &str) -> Tz {
    name.parse().unwrap_or(chrono_tz::UTC)
}

pub fn deadline_passed(deadline: DateTime<Utc>, tz: Tz, now: DateTime<Utc>) -> bool {
    now.with_timezone(&tz) > deadline.with_timezone(&tz)
}

pub fn event_ended(end_at: DateTime<Utc>, tz: Tz, now: DateTime<Utc>) -> bool {
    now.with_timezone(&tz) > end_at.with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        assert_eq!(zone("Mars/Olympus_Mons"), chrono_tz::UTC);
        assert_eq!(zone("Europe/Belgrade"), chrono_tz::Europe::Belgrade);
    }

    #[test]
    fn deadline_comparison_is_instant_based() {
        let tz = zone("Europe/Belgrade");
        let now = Utc::now();
        assert!(deadline_passed(now - Duration::minutes(1), tz, now));
        assert!(!deadline_passed(now + Duration::minutes(1), tz, now));
    }

    #[test]
    fn event_end_in_future_is_not_ended() {
        let tz = zone("Europe/Belgrade");
        let now = Utc::now();
        assert!(!event_ended(now + Duration::hours(2), tz, now));
        assert!(event_ended(now - Duration::hours(2), tz, now));
    }
}
