use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::types::Dataset;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::SessionNotFound(s.to_string()))
    }
}

/// Holds the current dataset of each session.
///
/// Sessions never share a mutable slot: replacing one session's dataset
/// swaps that session's `Arc` only, and readers holding the old `Arc` keep
/// a complete, unchanged dataset.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Start a session seeded with the default dataset, if one was loaded.
    async fn open_session(&self) -> Result<SessionId>;

    /// The session's dataset, or `None` when nothing has been loaded yet.
    async fn current(&self, session: &SessionId) -> Result<Option<Arc<Dataset>>>;

    /// Atomically replace the session's dataset.
    async fn replace(&self, session: &SessionId, dataset: Dataset) -> Result<Arc<Dataset>>;

    async fn close_session(&self, session: &SessionId) -> Result<()>;

    async fn session_count(&self) -> usize;

    /// Swap in a freshly ingested dataset, or leave the current one in place
    /// when ingestion failed.
    async fn replace_with(&self, session: &SessionId, loaded: Result<Dataset>) -> Result<Arc<Dataset>> {
        match loaded {
            Ok(dataset) => self.replace(session, dataset).await,
            Err(e) => {
                tracing::warn!("⚠️ Keeping current dataset for session {}: {}", session, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_bad_session_id() {
        let err = "not-a-session".parse::<SessionId>().unwrap_err();
        assert!(matches!(err, Error::SessionNotFound(_)));
    }
}
