use chrono::NaiveDateTime;
use ci_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod delimited;
pub mod spreadsheet;

pub use delimited::CsvReader;
pub use spreadsheet::SpreadsheetReader;

/// A single cell as handed over by a tabular reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// One data row keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Keeps the first value seen for a column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.entry(column.into()).or_insert_with(|| value.into());
    }

    /// The cell under `column`. Missing columns and null cells both read as `None`.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column).filter(|v| !v.is_null())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_null)
    }
}

/// Anything that can produce the rows of a table with named columns.
///
/// A reader yields every row or fails; it never hands back part of a table.
pub trait TabularReader {
    fn read(&self) -> Result<Vec<RawRow>>;
}

/// Where a reader takes its bytes from.
#[derive(Debug, Clone)]
pub enum TableSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Spreadsheet,
    Csv,
}

impl TableFormat {
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
            "csv" => Ok(TableFormat::Csv),
            _ => Err(Error::UnsupportedFormat(name.to_string())),
        }
    }
}

pub fn reader_for(format: TableFormat, source: TableSource) -> Box<dyn TabularReader> {
    match format {
        TableFormat::Spreadsheet => Box::new(SpreadsheetReader::new(source)),
        TableFormat::Csv => Box::new(CsvReader::new(source)),
    }
}

/// Turns a header row and data rows into `RawRow`s.
///
/// Blank header cells drop their column, cells beyond the header are
/// ignored and rows with no value at all are skipped.
pub(crate) fn rows_from_table<I, R>(header: &[String], rows: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = CellValue>,
{
    rows.into_iter()
        .map(|cells| {
            let mut row = RawRow::new();
            for (name, cell) in header.iter().zip(cells) {
                if !name.is_empty() {
                    row.insert(name.clone(), cell);
                }
            }
            row
        })
        .filter(|row| !row.is_blank())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cells_read_as_missing() {
        let row = RawRow::new().with("SBU", CellValue::Empty).with("source", "AP");
        assert_eq!(row.get("SBU"), None);
        assert_eq!(row.get("Competitor"), None);
        assert_eq!(row.get("source"), Some(&CellValue::Text("AP".to_string())));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(2024.0).to_string(), "2024");
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::from("").to_string(), "");
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(TableFormat::from_file_name("data.XLSX").unwrap(), TableFormat::Spreadsheet);
        assert_eq!(TableFormat::from_file_name("legacy.xls").unwrap(), TableFormat::Spreadsheet);
        assert_eq!(TableFormat::from_file_name("export.csv").unwrap(), TableFormat::Csv);
        assert!(matches!(
            TableFormat::from_file_name("notes.txt"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(TableFormat::from_file_name("no_extension").is_err());
    }

    #[test]
    fn test_rows_from_table() {
        let header = vec!["title".to_string(), String::new(), "source".to_string()];
        let rows = rows_from_table(
            &header,
            vec![
                vec![CellValue::from("a"), CellValue::from("ignored"), CellValue::from("AP"), CellValue::from("extra")],
                vec![CellValue::Empty, CellValue::Empty, CellValue::Empty],
                vec![CellValue::from("b")],
            ],
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("source"), Some(&CellValue::Text("AP".to_string())));
        assert_eq!(rows[1].get("source"), None);
    }
}
