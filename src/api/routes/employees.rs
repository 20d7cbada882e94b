//! Employee Routes
//!
//! Endpoints for managing the roster.
//!
//! - GET /api/v1/employees - List records in insertion order
//! - POST /api/v1/employees - Add one employee
//! - POST /api/v1/employees/batch - Add many employees
//! - DELETE /api/v1/employees?confirm=true - Clear the roster

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    AddEmployeeRequest, AddEmployeeResponse, BatchAddRequest, BatchAddResponse, BatchError,
    ClearParams, EmployeeDto, EmployeeListResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::roster::{EmployeeInput, RosterSnapshot};
use crate::websocket::WsEvent;

/// GET /api/v1/employees
///
/// List every record in the order it was added.
pub async fn list_employees(State(state): State<Arc<AppState>>) -> Json<EmployeeListResponse> {
    let records = state.roster.records().await;
    let employees: Vec<EmployeeDto> = records.iter().map(EmployeeDto::from).collect();

    Json(EmployeeListResponse {
        total: employees.len(),
        employees,
        policy: state.roster.policy().await,
    })
}

/// POST /api/v1/employees
///
/// Validate and add a single employee. Invalid input leaves the roster
/// untouched and answers 400.
pub async fn add_employee(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<AddEmployeeResponse>)> {
    let input = EmployeeInput::new(&req.name, req.sales)?;

    let snapshot = state.roster.add(input).await;
    state.notify_roster_changed(&snapshot);

    Ok((
        StatusCode::CREATED,
        Json(AddEmployeeResponse {
            status: "ok".to_string(),
            snapshot,
        }),
    ))
}

/// POST /api/v1/employees/batch
///
/// Add many employees at once. Valid entries are added in order; invalid
/// ones are reported by index.
pub async fn add_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchAddRequest>,
) -> ApiResult<(StatusCode, Json<BatchAddResponse>)> {
    if req.employees.is_empty() {
        return Err(ApiError::Validation("Empty batch".to_string()));
    }

    if req.employees.len() > state.config.max_batch_size {
        return Err(ApiError::Validation(format!(
            "Batch size exceeds maximum of {} employees",
            state.config.max_batch_size
        )));
    }

    let mut inputs = Vec::with_capacity(req.employees.len());
    let mut errors = Vec::new();

    for (index, employee) in req.employees.iter().enumerate() {
        match EmployeeInput::new(&employee.name, employee.sales) {
            Ok(input) => inputs.push(input),
            Err(e) => errors.push(BatchError {
                index,
                error: e.to_string(),
            }),
        }
    }

    let accepted = inputs.len();
    let snapshot = if accepted > 0 {
        let snapshot = state.roster.add_many(inputs).await;
        state.notify_roster_changed(&snapshot);
        snapshot
    } else {
        state.roster.snapshot().await
    };

    let (status, status_str) = batch_status(accepted, errors.len());

    Ok((
        status,
        Json(BatchAddResponse {
            status: status_str.to_string(),
            accepted,
            rejected: errors.len(),
            errors,
            snapshot,
        }),
    ))
}

fn batch_status(accepted: usize, rejected: usize) -> (StatusCode, &'static str) {
    if rejected == 0 {
        (StatusCode::CREATED, "ok")
    } else if accepted > 0 {
        (StatusCode::MULTI_STATUS, "partial")
    } else {
        (StatusCode::BAD_REQUEST, "rejected")
    }
}

/// DELETE /api/v1/employees?confirm=true
///
/// Remove every record. Without `confirm=true` nothing happens and the
/// request is answered with 409.
pub async fn clear_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClearParams>,
) -> ApiResult<Json<RosterSnapshot>> {
    if !params.confirm {
        return Err(ApiError::ConfirmationRequired(
            "pass confirm=true to clear all employee data".to_string(),
        ));
    }

    let snapshot = state.roster.clear().await;
    state.notify_roster_changed(&snapshot);
    state
        .ws_hub
        .publish(WsEvent::system("All employee data cleared"));

    Ok(Json(snapshot))
}
