//! Typed, read-only view of a balance-sheet report document.
//!
//! Deserialization is lenient: missing arrays become empty and unknown
//! fields are ignored, since the upstream owns the format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Invalid data structure")]
    InvalidStructure,

    #[error("section '{0}' not found")]
    SectionNotFound(String),
}

pub const ROW_TYPE_SECTION: &str = "Section";
pub const ROW_TYPE_SUMMARY: &str = "SummaryRow";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceSheetDocument {
    #[serde(default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    #[serde(default)]
    pub report_name: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
    /// `None` when the upstream omitted the array entirely.
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    #[serde(default)]
    pub row_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Cell {
    #[serde(default)]
    pub value: String,
}

impl BalanceSheetDocument {
    /// Top-level rows of the first report.
    pub fn first_report_rows(&self) -> Result<&[Row], ReportError> {
        self.reports
            .first()
            .and_then(|r| r.rows.as_deref())
            .ok_or(ReportError::InvalidStructure)
    }

    /// First section row with this title.
    pub fn section(&self, title: &str) -> Result<&Row, ReportError> {
        self.first_report_rows()?
            .iter()
            .find(|row| row.title.as_deref() == Some(title))
            .ok_or_else(|| ReportError::SectionNotFound(title.to_string()))
    }
}

impl Row {
    pub fn is_section(&self) -> bool {
        self.row_type == ROW_TYPE_SECTION
    }

    /// First nested row of type `SummaryRow`.
    pub fn summary_row(&self) -> Option<&Row> {
        self.rows.iter().find(|row| row.row_type == ROW_TYPE_SUMMARY)
    }

    pub fn cell_value(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.value.as_str())
    }

    /// First-cell value of every nested row.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().filter_map(|row| row.cell_value(0)).collect()
    }

    /// Rows whose label contains "Total" are shown as summaries.
    pub fn is_total(&self) -> bool {
        self.cell_value(0).is_some_and(|v| v.contains("Total"))
    }
}
