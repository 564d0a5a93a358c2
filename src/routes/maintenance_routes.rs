use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use tracing::debug;
use validator::Validate;

use crate::dto::maintenance_dto::{
    CompleteMaintenanceRequest, CreateMaintenanceRequest, UpcomingQuery, UpdateStatusRequest,
};
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::models::{MaintenanceRecord, MaintenanceWithVehicle};
use crate::services::maintenance_service::DEFAULT_UPCOMING_DAYS;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::extract::AppJson;

/// Rutas bajo `/maintenance`. Las de escritura pasan por `require_auth`.
pub fn create_maintenance_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_maintenance))
        .route("/:id/status", patch(update_status))
        .route("/:id/complete", patch(complete_maintenance))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/", get(list_maintenance))
        .route("/upcoming", get(upcoming_maintenance))
        .route("/vehicle/:id", get(vehicle_history))
        .route("/:id", get(get_maintenance))
        .merge(protected)
}

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| bad_request_error(&format!("Invalid id '{}'", raw)))
}

fn parse_days(raw: Option<&str>) -> AppResult<i64> {
    // `?days=` vacío cuenta como ausente
    match raw.filter(|raw| !raw.trim().is_empty()) {
        None => Ok(DEFAULT_UPCOMING_DAYS),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| bad_request_error(&format!("Invalid days '{}'", raw))),
    }
}

async fn create_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    request.validate()?;
    debug!("Usuario {} programa mantenimiento", user.user_id);

    let record = state.maintenance.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_maintenance(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MaintenanceWithVehicle>>> {
    Ok(Json(state.maintenance.find_all().await?))
}

async fn upcoming_maintenance(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<MaintenanceWithVehicle>>> {
    let days = parse_days(query.days.as_deref())?;
    Ok(Json(state.maintenance.get_upcoming_maintenance(days).await?))
}

async fn vehicle_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MaintenanceWithVehicle>>> {
    let vehicle_id = parse_id(&id)?;
    Ok(Json(
        state
            .maintenance
            .get_vehicle_maintenance_history(vehicle_id)
            .await?,
    ))
}

async fn get_maintenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MaintenanceWithVehicle>> {
    let id = parse_id(&id)?;
    Ok(Json(state.maintenance.find_one(id).await?))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<MaintenanceRecord>> {
    let id = parse_id(&id)?;
    debug!("Usuario {} cambia estado de {} a {}", user.user_id, id, request.status);

    Ok(Json(state.maintenance.update_status(id, request.status).await?))
}

// El body es opcional: vacío equivale a `{}`
async fn complete_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<MaintenanceRecord>> {
    let id = parse_id(&id)?;
    let request: CompleteMaintenanceRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CompleteMaintenanceRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| bad_request_error(&format!("Invalid body: {}", e)))?
    };
    request.validate()?;
    debug!("Usuario {} completa mantenimiento {}", user.user_id, id);

    Ok(Json(
        state
            .maintenance
            .complete(id, request.actual_cost, request.notes)
            .await?,
    ))
}
