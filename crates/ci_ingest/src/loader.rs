use ci_core::{Dataset, Result};
use std::path::Path;
use tracing::info;

use crate::normalize::normalize;
use crate::readers::{reader_for, TableFormat, TableSource, TabularReader};

/// File loaded at startup when it exists.
pub const DEFAULT_DATA_FILE: &str = "competitor_data.xlsx";

/// Reads every row, then normalizes. A reader failure yields no dataset at all.
pub fn ingest(reader: &dyn TabularReader) -> Result<Dataset> {
    let rows = reader.read()?;
    Ok(normalize(&rows))
}

pub fn load_path(path: &Path) -> Result<Dataset> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let format = TableFormat::from_file_name(&name)?;

    let dataset = ingest(reader_for(format, TableSource::Path(path.to_path_buf())).as_ref())?.with_origin(name);
    info!("📰 Loaded {} articles from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Ingests an uploaded file; the name only selects the format.
pub fn load_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Dataset> {
    let format = TableFormat::from_file_name(file_name)?;

    let dataset = ingest(reader_for(format, TableSource::Bytes(bytes)).as_ref())?.with_origin(file_name);
    info!("📰 Loaded {} articles from upload {}", dataset.len(), file_name);
    Ok(dataset)
}

/// Loads the bundled file. A missing file means "no data yet" and is not an error.
pub fn load_default(path: &Path) -> Result<Option<Dataset>> {
    if !path.exists() {
        info!("No default data file at {}, starting empty", path.display());
        return Ok(None);
    }
    load_path(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ci_core::Error;
    use std::io::Write;
    use tempfile::tempdir;

    const CSV: &str = "SBU,Competitor,keyword,newstitle,summary,publishedate,source,category\n\
                       \"Power, Rail\",Acme,grid,Acme wins,Big deal,2024-03-05,Reuters,Contract\n\
                       Water,,,Quiet week,,,,\n";

    #[test]
    fn test_load_csv_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::File::create(&path).unwrap().write_all(CSV.as_bytes()).unwrap();

        let dataset = load_path(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.origin(), Some("export.csv"));
        assert_eq!(dataset[0].business_units, vec!["Power", "Rail"]);
        assert_eq!(dataset[1].summary, "No summary available");
        assert_eq!(dataset[1].category, "Other");
    }

    #[test]
    fn test_load_bytes() {
        let dataset = load_bytes("upload.csv", CSV.as_bytes().to_vec()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].competitors, vec!["Acme"]);
    }

    #[test]
    fn test_unsupported_upload() {
        let err = load_bytes("notes.txt", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_corrupt_upload_is_ingestion_failure() {
        let err = load_bytes("data.xlsx", b"garbage".to_vec()).unwrap_err();
        assert!(err.is_ingestion());
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_missing_default_is_not_an_error() {
        let dir = tempdir().unwrap();
        let loaded = load_default(&dir.path().join(DEFAULT_DATA_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_default_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DATA_FILE);
        std::fs::write(&path, b"not a workbook").unwrap();
        assert!(matches!(load_default(&path), Err(Error::Ingestion(_))));
    }
}
