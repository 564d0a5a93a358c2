//! Modelo de Maintenance
//!
//! Este módulo contiene el registro de mantenimiento y sus variantes.
//! Mapea exactamente a la tabla `maintenance` del schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use super::vehicle::VehicleSummary;

/// Estado del mantenimiento - mapea al ENUM maintenance_status
///
/// No se valida la transición entre estados: cualquier estado puede pasar a
/// cualquier otro.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "SCHEDULED",
            MaintenanceStatus::InProgress => "IN_PROGRESS",
            MaintenanceStatus::Completed => "COMPLETED",
            MaintenanceStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registro de mantenimiento - fila de la tabla maintenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub description: String,
    pub service_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub estimated_cost: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub actual_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registro con el vehículo asociado (LEFT JOIN con vehicles)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceWithVehicle {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    pub vehicle: Option<VehicleSummary>,
}

/// Datos para insertar un nuevo mantenimiento; el estado inicial es SCHEDULED
#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub vehicle_id: i64,
    pub description: String,
    pub service_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub estimated_cost: Option<Decimal>,
}
