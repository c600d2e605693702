use ci_core::{Error, Result};
use std::fs::File;
use std::io::Read;

use super::{rows_from_table, CellValue, RawRow, TableSource, TabularReader};

/// Comma-separated export of the same sheet. Every cell is text.
#[derive(Debug, Clone)]
pub struct CsvReader {
    source: TableSource,
}

impl CsvReader {
    pub fn new(source: TableSource) -> Self {
        Self { source }
    }

    fn read_from<R: Read>(input: R) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| Error::Ingestion(format!("Failed to read CSV header: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Ingestion(format!("Failed to read CSV record: {}", e)))?;

        Ok(rows_from_table(
            &header,
            records
                .iter()
                .map(|record| record.iter().map(CellValue::from).collect::<Vec<_>>()),
        ))
    }
}

impl TabularReader for CsvReader {
    fn read(&self) -> Result<Vec<RawRow>> {
        match &self.source {
            TableSource::Path(path) => {
                let file = File::open(path)
                    .map_err(|e| Error::Ingestion(format!("Failed to open {}: {}", path.display(), e)))?;
                Self::read_from(file)
            }
            TableSource::Bytes(bytes) => Self::read_from(bytes.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_bytes() {
        let data = "SBU,Competitor,newstitle\n\"Power, Rail\",Acme,Acme wins\n,,\nWater,,Quiet week\n";
        let rows = CsvReader::new(TableSource::Bytes(data.as_bytes().to_vec())).read().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("SBU"), Some(&CellValue::Text("Power, Rail".to_string())));
        assert_eq!(rows[1].get("Competitor"), None);
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let data = b"newstitle\n\xff\xfe\n".to_vec();
        let result = CsvReader::new(TableSource::Bytes(data)).read();
        assert!(matches!(result, Err(Error::Ingestion(_))));
    }
}
