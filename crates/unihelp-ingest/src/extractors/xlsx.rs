//! XLSX text extractor.

use super::DocumentExtractor;
use crate::error::{IngestError, IngestResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// Linearizes workbooks: a marker line per worksheet, then one
/// tab-separated line per non-blank row.
pub struct XlsxExtractor;

impl DocumentExtractor for XlsxExtractor {
    fn extract(&self, path: &Path) -> IngestResult<String> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| IngestError::corrupt(path, format!("Failed to open workbook: {}", e)))?;

        let mut lines = Vec::new();
        for sheet_name in workbook.sheet_names() {
            lines.push(sheet_header(&sheet_name));

            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                IngestError::corrupt(path, format!("Failed to read sheet {}: {}", sheet_name, e))
            })?;

            for row in range.rows() {
                let line = render_row(row);
                if !line.trim().is_empty() {
                    lines.push(line);
                }
            }
        }

        Ok(lines.join("\n"))
    }
}

fn sheet_header(name: &str) -> String {
    format!("--- Sheet: {} ---", name)
}

/// Join non-empty cells with tabs, keeping column order.
fn render_row(row: &[Data]) -> String {
    row.iter()
        .filter_map(render_cell)
        .collect::<Vec<_>>()
        .join("\t")
}

fn render_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(e.to_string()),
    }
}
