use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateMemberRequest, SetupRequest};
use crate::api::dtos::responses::SetupResponse;
use crate::domain::models::user::{User, ROLE_ADMIN, ROLE_MEMBER};
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use rand::{distributions::Alphanumeric, Rng};
use tracing::info;

/// One-time bootstrap: creates the first administrator while the user table
/// is empty and hands back a generated secret. Locked once any user exists.
pub async fn setup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.user_repo.count().await? > 0 {
        return Err(AppError::Conflict("Setup has already been completed".into()));
    }

    let admin_secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();

    let password_hash = hash_password(&admin_secret)?;

    let user = User::new(
        payload.username.clone(),
        password_hash,
        ROLE_ADMIN.to_string(),
        payload.full_name.unwrap_or_default(),
        payload.email.unwrap_or_default(),
    );

    let created = state.user_repo.create(&user).await?;
    info!("Initial administrator created: {}", created.id);

    Ok(Json(SetupResponse {
        user_id: created.id,
        admin_username: payload.username,
        admin_secret,
    }))
}

pub async fn create_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    if state.user_repo.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let role = match payload.role.as_deref() {
        None | Some(ROLE_MEMBER) => ROLE_MEMBER.to_string(),
        Some(ROLE_ADMIN) => ROLE_ADMIN.to_string(),
        Some(other) => return Err(AppError::Validation(format!("Unknown role: {}", other))),
    };

    let password_hash = hash_password(&payload.password)?;

    let member = User::new(
        payload.username,
        password_hash,
        role,
        payload.full_name.unwrap_or_default(),
        payload.email.unwrap_or_default(),
    );

    let created = state.user_repo.create(&member).await?;
    info!("Member created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;
    let members = state.user_repo.list().await?;
    Ok(Json(members))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    if user.user_id == user_id {
        return Err(AppError::Validation("Cannot delete your own account".into()));
    }

    state.user_repo.delete(&user_id).await?;
    info!("Member deleted: {}", user_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}
