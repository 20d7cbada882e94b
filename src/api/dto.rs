//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::roster::{CommissionPolicy, EmployeeRecord, RosterSnapshot};

// ============================================
// EMPLOYEE DTOs
// ============================================

/// Add employee request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    /// Employee name, trimmed before use
    pub name: String,
    /// Sales amount, non-negative
    pub sales: f64,
}

/// Add employee response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddEmployeeResponse {
    /// Status: "ok"
    pub status: String,
    /// Roster state after the add
    pub snapshot: RosterSnapshot,
}

/// Batch add request
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchAddRequest {
    /// Employees to add, in order
    pub employees: Vec<AddEmployeeRequest>,
}

/// Batch add response
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchAddResponse {
    /// Status: "ok", "partial" or "rejected"
    pub status: String,
    /// Number of employees added
    pub accepted: usize,
    /// Number of employees rejected
    pub rejected: usize,
    /// Errors for rejected employees
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchError>,
    /// Roster state after the batch
    pub snapshot: RosterSnapshot,
}

/// Error for a single employee in a batch
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchError {
    /// Index of the failed employee
    pub index: usize,
    /// Error message
    pub error: String,
}

/// One stored record
#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub name: String,
    pub sales: f64,
    pub commission: f64,
}

impl From<&EmployeeRecord> for EmployeeDto {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            name: record.name().to_string(),
            sales: record.sales(),
            commission: record.commission(),
        }
    }
}

/// List employees response
#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    /// Records in insertion order
    pub employees: Vec<EmployeeDto>,
    /// Total count
    pub total: usize,
    /// Policy the commissions were derived with
    pub policy: CommissionPolicy,
}

/// Clear query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ClearParams {
    /// Must be `true` for the clear to happen
    #[serde(default)]
    pub confirm: bool,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: csv or json
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Employees currently on the roster
    pub employees: usize,
    /// Open WebSocket connections
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
