use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures caused by the supplied file rather than by the process.
    pub fn is_ingestion(&self) -> bool {
        matches!(self, Error::Ingestion(_) | Error::UnsupportedFormat(_))
    }
}
