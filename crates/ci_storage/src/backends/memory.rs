use async_trait::async_trait;
use ci_core::{Dataset, DatasetStore, Error, Result, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub struct MemoryStore {
    default_dataset: Option<Arc<Dataset>>,
    sessions: HashMap<SessionId, Option<Arc<Dataset>>>,
}

impl MemoryStore {
    pub fn new(default_dataset: Option<Dataset>) -> Self {
        Self {
            default_dataset: default_dataset.map(Arc::new),
            sessions: HashMap::new(),
        }
    }

    pub fn open_session(&mut self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, self.default_dataset.clone());
        id
    }

    pub fn current(&self, session: &SessionId) -> Result<Option<Arc<Dataset>>> {
        self.sessions
            .get(session)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(session.to_string()))
    }

    pub fn replace(&mut self, session: &SessionId, dataset: Dataset) -> Result<Arc<Dataset>> {
        let slot = self
            .sessions
            .get_mut(session)
            .ok_or_else(|| Error::SessionNotFound(session.to_string()))?;
        let dataset = Arc::new(dataset);
        *slot = Some(dataset.clone());
        Ok(dataset)
    }

    pub fn close_session(&mut self, session: &SessionId) -> Result<()> {
        self.sessions
            .remove(session)
            .map(|_| ())
            .ok_or_else(|| Error::SessionNotFound(session.to_string()))
    }
}

/// Session-scoped datasets kept in process memory.
#[derive(Clone)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_default(None)
    }

    /// Every new session starts from `default_dataset`.
    pub fn with_default(default_dataset: Option<Dataset>) -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(default_dataset))),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetStore for MemoryStorage {
    async fn open_session(&self) -> Result<SessionId> {
        let mut store = self.store.write().await;
        let id = store.open_session();
        info!("🆕 Opened session {}", id);
        Ok(id)
    }

    async fn current(&self, session: &SessionId) -> Result<Option<Arc<Dataset>>> {
        let store = self.store.read().await;
        store.current(session)
    }

    async fn replace(&self, session: &SessionId, dataset: Dataset) -> Result<Arc<Dataset>> {
        let mut store = self.store.write().await;
        let dataset = store.replace(session, dataset)?;
        info!("💾 Session {} now holds {} articles", session, dataset.len());
        Ok(dataset)
    }

    async fn close_session(&self, session: &SessionId) -> Result<()> {
        let mut store = self.store.write().await;
        store.close_session(session)?;
        info!("Closed session {}", session);
        Ok(())
    }

    async fn session_count(&self) -> usize {
        self.store.read().await.sessions.len()
    }
}
