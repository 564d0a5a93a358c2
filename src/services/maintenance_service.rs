//! Servicio de mantenimiento de vehículos
//!
//! Programa, consulta y completa los registros de mantenimiento. Toda la
//! persistencia pasa por el `MaintenanceRepository` inyectado.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::dto::maintenance_dto::{parse_scheduled_date, CreateMaintenanceRequest};
use crate::models::{MaintenanceRecord, MaintenanceStatus, MaintenanceWithVehicle, NewMaintenance};
use crate::repositories::MaintenanceRepository;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Ventana por defecto de `/upcoming`, en días
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Arc<dyn MaintenanceRepository>,
}

impl MaintenanceService {
    pub fn new(repository: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repository }
    }

    /// Programar un nuevo mantenimiento (estado inicial SCHEDULED)
    pub async fn create(&self, request: CreateMaintenanceRequest) -> AppResult<MaintenanceRecord> {
        let scheduled_date = parse_scheduled_date(&request.scheduled_date)?;

        let record = self
            .repository
            .insert(NewMaintenance {
                vehicle_id: request.vehicle_id,
                description: request.description,
                service_type: request.service_type,
                scheduled_date,
                estimated_cost: request.estimated_cost,
            })
            .await?;

        info!(
            "🔧 Mantenimiento {} programado para vehículo {} el {}",
            record.id, record.vehicle_id, record.scheduled_date
        );
        Ok(record)
    }

    pub async fn find_all(&self) -> AppResult<Vec<MaintenanceWithVehicle>> {
        self.repository.find_all().await
    }

    /// Buscar por ID; falla con not-found si no existe
    pub async fn find_one(&self, id: i64) -> AppResult<MaintenanceWithVehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::MaintenanceNotFound(id))
    }

    /// Cambiar el estado sin validar la transición.
    ///
    /// Solo COMPLETED fija `completed_date`; los demás estados lo dejan como estaba.
    pub async fn update_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
    ) -> AppResult<MaintenanceRecord> {
        let current = self.find_one(id).await?;

        let completed_date = (status == MaintenanceStatus::Completed).then(Utc::now);
        let record = self
            .repository
            .update_status(id, status, completed_date)
            .await?;

        info!(
            "🔄 Mantenimiento {}: {} → {}",
            id, current.record.status, record.status
        );
        Ok(record)
    }

    /// Marcar como completado; coste y notas solo se sobrescriben si vienen
    pub async fn complete(
        &self,
        id: i64,
        actual_cost: Option<Decimal>,
        notes: Option<String>,
    ) -> AppResult<MaintenanceRecord> {
        self.find_one(id).await?;

        let record = self
            .repository
            .complete(id, Utc::now(), actual_cost, notes)
            .await?;

        info!("✅ Mantenimiento {} completado", id);
        Ok(record)
    }

    /// Registros SCHEDULED con fecha <= ahora + `days`, atrasados incluidos
    pub async fn get_upcoming_maintenance(&self, days: i64) -> AppResult<Vec<MaintenanceWithVehicle>> {
        let cutoff = Duration::try_days(days)
            .and_then(|window| Utc::now().checked_add_signed(window))
            .ok_or_else(|| bad_request_error(&format!("days out of range: {}", days)))?;

        debug!("📅 Buscando mantenimientos programados hasta {}", cutoff);
        self.repository.find_scheduled_due_before(cutoff).await
    }

    /// Historial de un vehículo, más reciente primero
    pub async fn get_vehicle_maintenance_history(
        &self,
        vehicle_id: i64,
    ) -> AppResult<Vec<MaintenanceWithVehicle>> {
        self.repository.find_by_vehicle(vehicle_id).await
    }
}
