//! Plain-text table rendering of a report.

use std::fmt::Write;

use crate::report::model::{BalanceSheetDocument, ReportError, Row};

/// One rendered line of the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLine {
    /// Section heading spanning all columns.
    Title(String),
    /// `#`, label, value 1, value 2.
    Entry {
        marker: String,
        label: String,
        value_1: String,
        value_2: String,
    },
}

/// Flatten a document into table lines.
///
/// Only rows with a non-empty title and nested rows are shown. Nested rows are numbered
/// from 1, except "Total" rows which are marked `Summary`.
pub fn table_lines(doc: &BalanceSheetDocument) -> Result<Vec<TableLine>, ReportError> {
    let mut lines = Vec::new();

    for section in doc.first_report_rows()? {
        let Some(title) = section.title.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        if section.rows.is_empty() {
            continue;
        }

        lines.push(TableLine::Title(title.to_string()));
        lines.extend(section.rows.iter().enumerate().map(|(i, row)| entry(i, row)));
    }

    Ok(lines)
}

fn entry(index: usize, row: &Row) -> TableLine {
    let cell = |i| row.cell_value(i).unwrap_or_default().to_string();
    TableLine::Entry {
        marker: if row.is_total() {
            "Summary".to_string()
        } else {
            (index + 1).to_string()
        },
        label: cell(0),
        value_1: cell(1),
        value_2: cell(2),
    }
}

/// Render the whole report as aligned text.
pub fn render(doc: &BalanceSheetDocument) -> Result<String, ReportError> {
    let lines = table_lines(doc)?;

    let label_width = lines
        .iter()
        .filter_map(|line| match line {
            TableLine::Entry { label, .. } => Some(label.len()),
            TableLine::Title(_) => None,
        })
        .max()
        .unwrap_or(0)
        .max(5);

    let mut out = String::new();
    let name = doc
        .reports
        .first()
        .and_then(|r| r.report_name.as_deref())
        .unwrap_or("Balance Sheet Report");
    let _ = writeln!(out, "{name}");
    let _ = writeln!(
        out,
        "{:<8} {:<label_width$} {:>14} {:>14}",
        "#", "", "Value 1", "Value 2"
    );

    for line in &lines {
        match line {
            TableLine::Title(title) => {
                let _ = writeln!(out, "\n{title}");
            }
            TableLine::Entry {
                marker,
                label,
                value_1,
                value_2,
            } => {
                let _ = writeln!(
                    out,
                    "{marker:<8} {label:<label_width$} {value_1:>14} {value_2:>14}"
                );
            }
        }
    }

    Ok(out)
}
