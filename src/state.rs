use std::sync::Arc;
use crate::domain::ports::{
    AttendanceRepository, AuthRepository, EventRepository,
    RegistrationRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
}
