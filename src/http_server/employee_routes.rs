//! Employee HTTP Routes
//!
//! CRUD endpoints for employee records. Each handler decodes, validates,
//! delegates to the store and shapes the response; nothing is cached
//! between requests.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};

use super::errors::{ApiError, ApiResult};
use crate::employee::{validate, Employee, EmployeeInput};
use crate::store::EmployeeStore;

// ==================
// Shared State
// ==================

/// Employee state shared across handlers
pub struct EmployeeState {
    pub store: Arc<dyn EmployeeStore>,
}

impl EmployeeState {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// ==================
// Employee Routes
// ==================

/// Create employee routes
pub fn employee_routes(state: Arc<EmployeeState>) -> Router {
    Router::new()
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:id",
            put(update_employee_handler).delete(delete_employee_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Decode and validate an employee body.
///
/// Content-Type is not checked; any JSON object body that parses as an
/// employee is accepted.
fn employee_from_body(body: &[u8]) -> ApiResult<EmployeeInput> {
    let employee =
        EmployeeInput::from_json(body).map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
    validate(&employee)?;
    Ok(employee)
}

// ==================
// Handlers
// ==================

async fn list_employees_handler(
    State(state): State<Arc<EmployeeState>>,
) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state
        .store
        .list_all()
        .await
        .map_err(ApiError::store("retrieve employees"))?;

    Ok(Json(employees))
}

async fn create_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let employee = employee_from_body(&body)?;

    let id = state
        .store
        .insert(&employee)
        .await
        .map_err(ApiError::store("insert employee"))?;
    info!(%id, "inserted employee");

    Ok(MessageResponse::new("Employee created successfully"))
}

async fn update_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let employee = employee_from_body(&body)?;

    let outcome = state
        .store
        .update_by_id(&id, &employee)
        .await
        .map_err(ApiError::store("update employee"))?;

    // Updating a missing id is reported as success; only the log tells.
    if outcome.matched == 0 {
        warn!(%id, "update matched no employee");
    } else {
        info!(%id, modified = outcome.modified, "updated employee");
    }

    Ok(MessageResponse::new("Employee updated successfully"))
}

async fn delete_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .store
        .delete_by_id(&id)
        .await
        .map_err(ApiError::store("delete employee"))?;
    info!(%id, "deleted employee");

    Ok(MessageResponse::new("Employee deleted successfully"))
}
