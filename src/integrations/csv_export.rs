//! Ranked view export
//!
//! Writes the ranked view as CSV or pretty JSON. Amounts are written as
//! plain numbers so the files stay machine-readable.

use serde::Serialize;
use std::io::Write;

use super::ImportError;
use crate::roster::RankedEntry;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Render the ranked view in this format
    pub fn render(&self, ranked: &[RankedEntry]) -> Result<String, ImportError> {
        match self {
            ExportFormat::Csv => ranking_to_csv(ranked),
            ExportFormat::Json => ranking_to_json(ranked),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unsupported export format: {}", other)),
        }
    }
}

#[derive(Serialize)]
struct ExportRow<'a> {
    rank: usize,
    name: &'a str,
    sales: f64,
    commission: f64,
    status: &'a str,
}

impl<'a> From<&'a RankedEntry> for ExportRow<'a> {
    fn from(entry: &'a RankedEntry) -> Self {
        Self {
            rank: entry.rank,
            name: &entry.name,
            sales: entry.sales,
            commission: entry.commission,
            status: entry.label.as_str(),
        }
    }
}

/// Write the ranked view as CSV with a header row
pub fn write_ranking_csv<W: Write>(ranked: &[RankedEntry], writer: W) -> Result<(), ImportError> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in ranked {
        writer.serialize(ExportRow::from(entry))?;
    }
    // serde only emits the header alongside the first row
    if ranked.is_empty() {
        writer.write_record(["rank", "name", "sales", "commission", "status"])?;
    }
    writer.flush()?;
    Ok(())
}

/// Ranked view as a CSV string
pub fn ranking_to_csv(ranked: &[RankedEntry]) -> Result<String, ImportError> {
    let mut buf = Vec::new();
    write_ranking_csv(ranked, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Ranked view as a pretty JSON array
pub fn ranking_to_json(ranked: &[RankedEntry]) -> Result<String, ImportError> {
    let rows: Vec<ExportRow<'_>> = ranked.iter().map(ExportRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
