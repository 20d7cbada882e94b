//! CSV Import
//!
//! Reads employees from a CSV file with a header row. The name column is
//! the first header containing "name"; the sales column is the first
//! containing "sales" or "amount". Matching is case-insensitive.

use std::io::Read;
use std::path::Path;

use super::ImportError;
use crate::roster::EmployeeInput;

/// Column mapping for an employee CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvImporter {
    /// Column index of the employee name (0-indexed)
    name_column: usize,
    /// Column index of the sales amount
    sales_column: usize,
}

/// A row that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// Line number in the file, counting the header as line 1
    pub line: usize,
    pub error: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.error)
    }
}

/// Result of a CSV import operation
#[derive(Debug, Default)]
pub struct CsvImportResult {
    /// Validated employees, in file order
    pub employees: Vec<EmployeeInput>,
    pub rows_failed: usize,
    pub errors: Vec<RowError>,
}

/// Maximum errors kept in a result before the rest are only counted
const MAX_REPORTED_ERRORS: usize = 100;

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl CsvImporter {
    /// Use explicit column indices
    pub fn new(name_column: usize, sales_column: usize) -> Self {
        Self {
            name_column,
            sales_column,
        }
    }

    /// Detect the name and sales columns from a header row
    pub fn detect(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        let name_column = lowered
            .iter()
            .position(|h| h.contains("name"))
            .ok_or_else(|| ImportError::MissingColumn("name".to_string()))?;

        let sales_column = lowered
            .iter()
            .enumerate()
            .find(|(idx, h)| *idx != name_column && (h.contains("sales") || h.contains("amount")))
            .map(|(idx, _)| idx)
            .ok_or_else(|| ImportError::MissingColumn("sales".to_string()))?;

        Ok(Self::new(name_column, sales_column))
    }

    /// Import rows from any reader. The first record is the header and is
    /// skipped.
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<CsvImportResult, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut result = CsvImportResult::default();

        for (idx, record) in reader.records().enumerate() {
            let line = idx + 2;

            let outcome = record
                .map_err(|e| e.to_string())
                .and_then(|record| self.parse_record(&record));

            match outcome {
                Ok(input) => result.employees.push(input),
                Err(error) => {
                    result.rows_failed += 1;
                    if result.errors.len() < MAX_REPORTED_ERRORS {
                        result.errors.push(RowError { line, error });
                    }
                }
            }
        }

        tracing::debug!(
            imported = result.employees.len(),
            failed = result.rows_failed,
            "CSV import finished"
        );

        Ok(result)
    }

    /// Import from a CSV file
    pub fn import(&self, path: &Path) -> Result<CsvImportResult, ImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Import from a CSV string
    pub fn import_str(&self, csv_data: &str) -> Result<CsvImportResult, ImportError> {
        self.import_reader(csv_data.as_bytes())
    }

    fn parse_record(&self, record: &csv::StringRecord) -> Result<EmployeeInput, String> {
        let name = record
            .get(self.name_column)
            .ok_or_else(|| "missing name column".to_string())?;
        let sales = record
            .get(self.sales_column)
            .ok_or_else(|| "missing sales column".to_string())?;

        EmployeeInput::parse(name, sales).map_err(|e| e.to_string())
    }
}

/// Import an employee CSV, detecting columns from its header
pub fn import_employees_csv(path: &Path) -> Result<CsvImportResult, ImportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let importer = CsvImporter::detect(&headers)?;
    tracing::info!(
        path = %path.display(),
        name_column = importer.name_column,
        sales_column = importer.sales_column,
        "Importing employees"
    );

    importer.import(path)
}
