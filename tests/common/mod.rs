#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

use fleet_maintenance::{
    models::{MaintenanceRecord, MaintenanceStatus, MaintenanceWithVehicle, NewMaintenance, VehicleSummary},
    repositories::MaintenanceRepository,
    services::MaintenanceService,
    utils::{errors::AppError, jwt::JwtConfig},
    AppState,
};

pub const TEST_SECRET: &str = "test-secret";

/// Repositorio en memoria con la misma semántica que la implementación SQL
#[derive(Default)]
pub struct InMemoryMaintenanceRepository {
    records: RwLock<Vec<MaintenanceRecord>>,
    vehicles: RwLock<Vec<VehicleSummary>>,
}

impl InMemoryMaintenanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_vehicle(&self, id: i64, license_plate: &str) {
        self.vehicles.write().await.push(VehicleSummary {
            id,
            license_plate: license_plate.to_string(),
            brand: None,
            model: None,
            vehicle_status: "active".to_string(),
        });
    }

    async fn join(&self, record: MaintenanceRecord) -> MaintenanceWithVehicle {
        let vehicle = self
            .vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == record.vehicle_id)
            .cloned();
        MaintenanceWithVehicle { record, vehicle }
    }

    async fn join_all(&self, records: Vec<MaintenanceRecord>) -> Vec<MaintenanceWithVehicle> {
        let mut joined = Vec::with_capacity(records.len());
        for record in records {
            joined.push(self.join(record).await);
        }
        joined
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryMaintenanceRepository {
    async fn insert(&self, new: NewMaintenance) -> Result<MaintenanceRecord, AppError> {
        let mut records = self.records.write().await;
        let now = Utc::now();
        let record = MaintenanceRecord {
            id: records.len() as i64 + 1,
            vehicle_id: new.vehicle_id,
            description: new.description,
            service_type: new.service_type,
            scheduled_date: new.scheduled_date,
            completed_date: None,
            estimated_cost: new.estimated_cost,
            actual_cost: None,
            notes: None,
            status: MaintenanceStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let mut records = self.records.read().await.clone();
        records.sort_by_key(|r| (r.scheduled_date, r.id));
        Ok(self.join_all(records).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceWithVehicle>, AppError> {
        let record = self.records.read().await.iter().find(|r| r.id == id).cloned();
        match record {
            Some(record) => Ok(Some(self.join(record).await)),
            None => Ok(None),
        }
    }

    async fn find_scheduled_due_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let mut records: Vec<_> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.status == MaintenanceStatus::Scheduled && r.scheduled_date <= cutoff)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.scheduled_date, r.id));
        Ok(self.join_all(records).await)
    }

    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let mut records: Vec<_> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse((r.scheduled_date, r.id)));
        Ok(self.join_all(records).await)
    }

    async fn update_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
        completed_date: Option<DateTime<Utc>>,
    ) -> Result<MaintenanceRecord, AppError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::MaintenanceNotFound(id))?;
        record.status = status;
        if completed_date.is_some() {
            record.completed_date = completed_date;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn complete(
        &self,
        id: i64,
        completed_date: DateTime<Utc>,
        actual_cost: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<MaintenanceRecord, AppError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::MaintenanceNotFound(id))?;
        record.status = MaintenanceStatus::Completed;
        record.completed_date = Some(completed_date);
        if actual_cost.is_some() {
            record.actual_cost = actual_cost;
        }
        if notes.is_some() {
            record.notes = notes;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

pub fn test_service() -> (MaintenanceService, Arc<InMemoryMaintenanceRepository>) {
    let repository = Arc::new(InMemoryMaintenanceRepository::new());
    (MaintenanceService::new(repository.clone()), repository)
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, 3600)
}

pub fn test_state() -> (AppState, Arc<InMemoryMaintenanceRepository>) {
    let repository = Arc::new(InMemoryMaintenanceRepository::new());
    (AppState::new(repository.clone(), test_jwt_config()), repository)
}
