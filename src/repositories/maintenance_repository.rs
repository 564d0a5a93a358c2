use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::{
    MaintenanceRecord, MaintenanceStatus, MaintenanceWithVehicle, NewMaintenance, VehicleSummary,
};
use crate::utils::errors::AppError;

/// Acceso a la tabla maintenance.
///
/// Las marcas de tiempo llegan calculadas desde el servicio; las
/// implementaciones no leen el reloj.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn insert(&self, new: NewMaintenance) -> Result<MaintenanceRecord, AppError>;

    /// Todos los registros, fecha programada ascendente
    async fn find_all(&self) -> Result<Vec<MaintenanceWithVehicle>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceWithVehicle>, AppError>;

    /// Registros SCHEDULED con `scheduled_date <= cutoff` (incluye atrasados), ascendente
    async fn find_scheduled_due_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<MaintenanceWithVehicle>, AppError>;

    /// Registros de un vehículo, fecha programada descendente
    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<MaintenanceWithVehicle>, AppError>;

    /// `completed_date = None` conserva el valor guardado
    async fn update_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
        completed_date: Option<DateTime<Utc>>,
    ) -> Result<MaintenanceRecord, AppError>;

    /// Marca COMPLETED; `actual_cost`/`notes` en `None` conservan el valor guardado
    async fn complete(
        &self,
        id: i64,
        completed_date: DateTime<Utc>,
        actual_cost: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<MaintenanceRecord, AppError>;
}

// Fila del LEFT JOIN maintenance + vehicles
#[derive(Debug, sqlx::FromRow)]
struct MaintenanceRow {
    #[sqlx(flatten)]
    record: MaintenanceRecord,
    joined_vehicle_id: Option<i64>,
    vehicle_license_plate: Option<String>,
    vehicle_brand: Option<String>,
    vehicle_model: Option<String>,
    vehicle_status: Option<String>,
}

impl From<MaintenanceRow> for MaintenanceWithVehicle {
    fn from(row: MaintenanceRow) -> Self {
        let vehicle = match (row.joined_vehicle_id, row.vehicle_license_plate) {
            (Some(id), Some(license_plate)) => Some(VehicleSummary {
                id,
                license_plate,
                brand: row.vehicle_brand,
                model: row.vehicle_model,
                vehicle_status: row.vehicle_status.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            record: row.record,
            vehicle,
        }
    }
}

const SELECT_WITH_VEHICLE: &str = r#"
    SELECT
        m.id, m.vehicle_id, m.description, m.service_type, m.scheduled_date,
        m.completed_date, m.estimated_cost, m.actual_cost, m.notes, m.status,
        m.created_at, m.updated_at,
        v.id AS joined_vehicle_id,
        v.license_plate AS vehicle_license_plate,
        v.brand AS vehicle_brand,
        v.model AS vehicle_model,
        v.vehicle_status AS vehicle_status
    FROM maintenance m
    LEFT JOIN vehicles v ON v.id = m.vehicle_id
"#;

const RETURNING_RECORD: &str = r#"
    RETURNING id, vehicle_id, description, service_type, scheduled_date,
        completed_date, estimated_cost, actual_cost, notes, status,
        created_at, updated_at
"#;

/// Implementación PostgreSQL sobre SQLx
#[derive(Clone)]
pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_joined(
        &self,
        sql: String,
        bind: Option<JoinedBind>,
    ) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let query = sqlx::query_as::<_, MaintenanceRow>(&sql);
        let query = match bind {
            Some(JoinedBind::Id(id)) => query.bind(id),
            Some(JoinedBind::Cutoff(cutoff)) => query.bind(MaintenanceStatus::Scheduled).bind(cutoff),
            None => query,
        };

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(MaintenanceWithVehicle::from).collect())
    }
}

enum JoinedBind {
    Id(i64),
    Cutoff(DateTime<Utc>),
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn insert(&self, new: NewMaintenance) -> Result<MaintenanceRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO maintenance (vehicle_id, description, service_type, scheduled_date, estimated_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            {}
            "#,
            RETURNING_RECORD
        );

        let record = sqlx::query_as::<_, MaintenanceRecord>(&sql)
            .bind(new.vehicle_id)
            .bind(new.description)
            .bind(new.service_type)
            .bind(new.scheduled_date)
            .bind(new.estimated_cost)
            .bind(MaintenanceStatus::Scheduled)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let sql = format!("{} ORDER BY m.scheduled_date ASC, m.id ASC", SELECT_WITH_VEHICLE);
        self.fetch_joined(sql, None).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceWithVehicle>, AppError> {
        let sql = format!("{} WHERE m.id = $1", SELECT_WITH_VEHICLE);
        let mut rows = self.fetch_joined(sql, Some(JoinedBind::Id(id))).await?;
        Ok(rows.pop())
    }

    async fn find_scheduled_due_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let sql = format!(
            "{} WHERE m.status = $1 AND m.scheduled_date <= $2 ORDER BY m.scheduled_date ASC, m.id ASC",
            SELECT_WITH_VEHICLE
        );
        self.fetch_joined(sql, Some(JoinedBind::Cutoff(cutoff))).await
    }

    async fn find_by_vehicle(&self, vehicle_id: i64) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let sql = format!(
            "{} WHERE m.vehicle_id = $1 ORDER BY m.scheduled_date DESC, m.id DESC",
            SELECT_WITH_VEHICLE
        );
        self.fetch_joined(sql, Some(JoinedBind::Id(vehicle_id))).await
    }

    async fn update_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
        completed_date: Option<DateTime<Utc>>,
    ) -> Result<MaintenanceRecord, AppError> {
        let sql = format!(
            r#"
            UPDATE maintenance
            SET status = $2,
                completed_date = COALESCE($3, completed_date),
                updated_at = NOW()
            WHERE id = $1
            {}
            "#,
            RETURNING_RECORD
        );

        sqlx::query_as::<_, MaintenanceRecord>(&sql)
            .bind(id)
            .bind(status)
            .bind(completed_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::MaintenanceNotFound(id))
    }

    async fn complete(
        &self,
        id: i64,
        completed_date: DateTime<Utc>,
        actual_cost: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<MaintenanceRecord, AppError> {
        let sql = format!(
            r#"
            UPDATE maintenance
            SET status = $2,
                completed_date = $3,
                actual_cost = COALESCE($4, actual_cost),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1
            {}
            "#,
            RETURNING_RECORD
        );

        sqlx::query_as::<_, MaintenanceRecord>(&sql)
            .bind(id)
            .bind(MaintenanceStatus::Completed)
            .bind(completed_date)
            .bind(actual_cost)
            .bind(notes)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::MaintenanceNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MaintenanceRecord {
        let now = Utc::now();
        MaintenanceRecord {
            id: 1,
            vehicle_id: 9,
            description: "Tyres".to_string(),
            service_type: "TYRES".to_string(),
            scheduled_date: now,
            completed_date: None,
            estimated_cost: None,
            actual_cost: None,
            notes: None,
            status: MaintenanceStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_without_vehicle_maps_to_none() {
        let row = MaintenanceRow {
            record: record(),
            joined_vehicle_id: None,
            vehicle_license_plate: None,
            vehicle_brand: None,
            vehicle_model: None,
            vehicle_status: None,
        };
        assert!(MaintenanceWithVehicle::from(row).vehicle.is_none());
    }

    #[test]
    fn test_row_with_vehicle_maps_summary() {
        let row = MaintenanceRow {
            record: record(),
            joined_vehicle_id: Some(9),
            vehicle_license_plate: Some("AB-123-CD".to_string()),
            vehicle_brand: Some("Renault".to_string()),
            vehicle_model: None,
            vehicle_status: Some("active".to_string()),
        };
        let joined = MaintenanceWithVehicle::from(row);
        let vehicle = joined.vehicle.unwrap();
        assert_eq!(vehicle.id, 9);
        assert_eq!(vehicle.license_plate, "AB-123-CD");
        assert_eq!(vehicle.vehicle_status, "active");
    }
}
