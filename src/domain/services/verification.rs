use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};

use crate::domain::models::registration::Registration;
use crate::domain::models::user::User;

/// Maximum age of the client-side timestamp embedded in a user-profile QR
/// payload. The stored token itself does not expire; this is the second
/// layer of the two-layer check.
pub const USER_QR_FRESHNESS_HOURS: i64 = 24;

pub fn generate_qr_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Outcome of a read-only credential check. Validation never mutates the
/// stored token.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(&'static str),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(reason) => Some(reason),
        }
    }
}

/// Validates a user-profile credential: the presented token must exactly
/// match the stored one, and the presented timestamp (epoch ms) must be
/// within the freshness window.
pub fn validate_user_payload(user: &User, presented_token: &str, presented_ts_ms: i64, now: DateTime<Utc>) -> Verdict {
    if user.qr_token != presented_token {
        return Verdict::Invalid("QR token does not match, ask the holder to refresh their code");
    }

    let age = now.timestamp_millis() - presented_ts_ms;
    if age > Duration::hours(USER_QR_FRESHNESS_HOURS).num_milliseconds() {
        return Verdict::Invalid("QR code is older than 24 hours, ask the holder to refresh it");
    }

    Verdict::Valid
}

/// Validates an event-registration credential against the stored row.
/// Registration codes stay valid until the registration is cancelled.
pub fn validate_registration_payload(registration: &Registration, event_id: &str, email: &str) -> Verdict {
    if !registration.is_active() {
        return Verdict::Invalid("registration has been cancelled");
    }
    if registration.event_id != event_id {
        return Verdict::Invalid("registration belongs to a different event");
    }
    if !registration.email.eq_ignore_ascii_case(email) {
        return Verdict::Invalid("registration details do not match");
    }
    Verdict::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::registration::{NewRegistrationParams, Registration, STATUS_CANCELLED, PAYMENT_FREE};
    use crate::domain::models::user::{User, ROLE_MEMBER};

    fn test_user() -> User {
        User::new(
            "mira".into(),
            "hash".into(),
            ROLE_MEMBER.into(),
            "Mira N.".into(),
            "mira@example.com".into(),
        )
    }

    fn test_registration() -> Registration {
        Registration::new(NewRegistrationParams {
            event_id: "e-1".into(),
            user_id: None,
            full_name: "Ana".into(),
            email: "Ana@Example.com".into(),
            phone: "".into(),
            tickets: 2,
            total_amount: 0,
            payment_status: PAYMENT_FREE.into(),
        })
    }

    #[test]
    fn fresh_matching_user_token_is_valid() {
        let user = test_user();
        let now = Utc::now();
        let verdict = validate_user_payload(&user, &user.qr_token, now.timestamp_millis(), now);
        assert!(verdict.is_valid());
    }

    #[test]
    fn mismatched_user_token_is_invalid() {
        let user = test_user();
        let now = Utc::now();
        let verdict = validate_user_payload(&user, "somebody-elses-token", now.timestamp_millis(), now);
        assert!(!verdict.is_valid());
    }

    #[test]
    fn stale_timestamp_fails_even_with_matching_token() {
        let user = test_user();
        let now = Utc::now();
        let stale = (now - Duration::hours(25)).timestamp_millis();
        let verdict = validate_user_payload(&user, &user.qr_token, stale, now);
        assert_eq!(verdict.reason(), Some("QR code is older than 24 hours, ask the holder to refresh it"));
    }

    #[test]
    fn timestamp_just_inside_window_passes() {
        let user = test_user();
        let now = Utc::now();
        let almost = (now - Duration::hours(23)).timestamp_millis();
        assert!(validate_user_payload(&user, &user.qr_token, almost, now).is_valid());
    }

    #[test]
    fn registration_payload_matches_case_insensitively() {
        let registration = test_registration();
        assert!(validate_registration_payload(&registration, "e-1", "ana@example.com").is_valid());
    }

    #[test]
    fn cancelled_registration_is_invalid() {
        let mut registration = test_registration();
        registration.status = STATUS_CANCELLED.to_string();
        assert!(!validate_registration_payload(&registration, "e-1", "ana@example.com").is_valid());
    }

    #[test]
    fn wrong_event_or_email_is_invalid() {
        let registration = test_registration();
        assert!(!validate_registration_payload(&registration, "e-2", "ana@example.com").is_valid());
        assert!(!validate_registration_payload(&registration, "e-1", "other@example.com").is_valid());
    }
}
