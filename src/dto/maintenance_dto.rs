use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::MaintenanceStatus;
use crate::utils::errors::{validation_error, AppResult};

// Request para programar un mantenimiento
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i64,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    pub scheduled_date: String,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_cost")]
    pub estimated_cost: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub service_type: String,
}

// Request para cambiar el estado
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: MaintenanceStatus,
}

// Request para marcar como completado; todos los campos son opcionales
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteMaintenanceRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_cost")]
    pub actual_cost: Option<Decimal>,

    pub notes: Option<String>,
}

// Query de /upcoming
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<String>,
}

fn validate_cost(cost: &Decimal) -> Result<(), ValidationError> {
    if cost.is_sign_negative() {
        return Err(ValidationError::new("negative_cost"));
    }
    Ok(())
}

/// Parsear la fecha programada.
///
/// Acepta RFC 3339 (`2024-05-01T08:00:00+02:00`), fecha-hora sin zona
/// (interpretada como UTC) o solo fecha (medianoche UTC).
pub fn parse_scheduled_date(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(validation_error(
        "scheduledDate",
        &format!("'{}' is not a valid date", raw),
    ))
}
