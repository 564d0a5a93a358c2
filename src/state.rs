//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::repositories::MaintenanceRepository;
use crate::services::MaintenanceService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub maintenance: MaintenanceService,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn MaintenanceRepository>, jwt: JwtConfig) -> Self {
        Self {
            maintenance: MaintenanceService::new(repository),
            jwt,
        }
    }
}
