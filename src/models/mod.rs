//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod maintenance;
pub mod vehicle;

pub use maintenance::{MaintenanceRecord, MaintenanceStatus, MaintenanceWithVehicle, NewMaintenance};
pub use vehicle::VehicleSummary;
