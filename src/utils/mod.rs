//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, extracción de JSON y JWT.

pub mod errors;
pub mod extract;
pub mod jwt;

pub use errors::{AppError, AppResult};
