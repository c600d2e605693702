use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, DataType, Range, Reader, Sheets};
use ci_core::{Error, Result};
use std::io::{Cursor, Read, Seek};

use super::{rows_from_table, CellValue, RawRow, TableSource, TabularReader};

/// Reads the first worksheet of an Excel or OpenDocument workbook.
/// The first row holds the column names.
#[derive(Debug, Clone)]
pub struct SpreadsheetReader {
    source: TableSource,
}

impl SpreadsheetReader {
    pub fn new(source: TableSource) -> Self {
        Self { source }
    }
}

impl TabularReader for SpreadsheetReader {
    fn read(&self) -> Result<Vec<RawRow>> {
        let range = match &self.source {
            TableSource::Path(path) => {
                let workbook = open_workbook_auto(path)
                    .map_err(|e| Error::Ingestion(format!("Failed to open workbook {}: {}", path.display(), e)))?;
                first_worksheet(workbook)?
            }
            TableSource::Bytes(bytes) => {
                let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.clone()))
                    .map_err(|e| Error::Ingestion(format!("Failed to open workbook: {}", e)))?;
                first_worksheet(workbook)?
            }
        };

        Ok(rows_from_range(&range))
    }
}

fn first_worksheet<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Range<Data>> {
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Ingestion("No worksheet found".to_string()))?
        .map_err(|e| Error::Ingestion(format!("Failed to read worksheet: {}", e)))
}

fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Vec::new(),
    };

    rows_from_table(&header, rows.map(|cells| cells.iter().map(cell_value)))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => other
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::from(other.to_string().as_str())),
    }
}
