//! Servicio de mantenimiento de vehículos
//!
//! API REST para programar, seguir y completar el mantenimiento de la flota,
//! sobre PostgreSQL con SQLx.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
