use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::Claims;
use crate::domain::services::auth_service::JWT_AUDIENCE;
use std::convert::Infallible;
use std::sync::Arc;
use tower_cookies::Cookies;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};

/// Optional identity for public endpoints: a valid access token attaches
/// the caller's user id to the request, anything else silently yields None.
/// No CSRF enforcement here; the endpoints using this are open anyway.
pub struct MaybeAuthUser(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(cookies) = parts.extensions.get::<Cookies>() else {
            return Ok(MaybeAuthUser(None));
        };

        let Some(cookie) = cookies.get("access_token") else {
            return Ok(MaybeAuthUser(None));
        };
        let access_token = cookie.value().to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let Ok(decoding_key) = DecodingKey::from_ed_pem(app_state.config.jwt_public_key.as_bytes()) else {
            return Ok(MaybeAuthUser(None));
        };

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[JWT_AUDIENCE]);

        match decode::<Claims>(&access_token, &decoding_key, &validation) {
            Ok(token_data) => Ok(MaybeAuthUser(Some(token_data.claims.sub))),
            Err(_) => Ok(MaybeAuthUser(None)),
        }
    }
}
