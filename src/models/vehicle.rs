//! Modelo de Vehicle
//!
//! La tabla vehicles pertenece al módulo de flota. Aquí solo se lee el
//! resumen que acompaña a cada registro de mantenimiento.

use serde::{Deserialize, Serialize};

/// Resumen del vehículo incluido en las consultas de mantenimiento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: i64,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_status: String,
}
