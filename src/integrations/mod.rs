//! File Integrations
//!
//! Moving roster data in and out of files:
//! - CSV import (name/sales columns, auto-detected)
//! - CSV and JSON export of the ranked view

mod csv_export;
mod csv_import;

pub use csv_export::{ranking_to_csv, ranking_to_json, write_ranking_csv, ExportFormat};
pub use csv_import::{import_employees_csv, CsvImportResult, CsvImporter, RowError};

/// Errors that can occur while importing or exporting
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
