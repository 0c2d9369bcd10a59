use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use study_core::model::{SessionRecord, SessionRecordId};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// A stored record together with the id the repository assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecordRow {
    pub id: SessionRecordId,
    pub record: SessionRecord,
}

/// Session history owned by the persistence collaborator.
///
/// Records are append-only; the dashboard reads projections of them and never
/// keeps its own copy.
#[async_trait]
pub trait SessionHistoryRepository: Send + Sync {
    /// Store a finished session and return its new id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_record(&self, record: &SessionRecord) -> Result<SessionRecordId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no record has this id.
    async fn get_record(&self, id: SessionRecordId) -> Result<SessionRecord, StorageError>;

    /// Every record, oldest completion first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_records(&self) -> Result<Vec<SessionRecordRow>, StorageError>;

    /// Up to `limit` records, newest completion first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_recent(&self, limit: u32) -> Result<Vec<SessionRecordRow>, StorageError>;
}

#[derive(Default)]
struct HistoryTable {
    next_id: u64,
    rows: Vec<SessionRecordRow>,
}

/// Process-local history, cleared when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    history: Arc<Mutex<HistoryTable>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(
        &self,
        f: impl FnOnce(&mut HistoryTable) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        f(&mut *guard)
    }
}

#[async_trait]
impl SessionHistoryRepository for InMemoryRepository {
    async fn append_record(&self, record: &SessionRecord) -> Result<SessionRecordId, StorageError> {
        self.with_table(|table| {
            table.next_id += 1;
            let id = SessionRecordId::new(table.next_id);
            // Keep rows sorted by completion time; equal timestamps stay in insertion order.
            let at = table
                .rows
                .partition_point(|row| row.record.completed_at() <= record.completed_at());
            table.rows.insert(
                at,
                SessionRecordRow {
                    id,
                    record: record.clone(),
                },
            );
            log::debug!("stored session record {id}");
            Ok(id)
        })
    }

    async fn get_record(&self, id: SessionRecordId) -> Result<SessionRecord, StorageError> {
        self.with_table(|table| {
            table
                .rows
                .iter()
                .find(|row| row.id == id)
                .map(|row| row.record.clone())
                .ok_or(StorageError::NotFound)
        })
    }

    async fn list_records(&self) -> Result<Vec<SessionRecordRow>, StorageError> {
        self.with_table(|table| Ok(table.rows.clone()))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<SessionRecordRow>, StorageError> {
        self.with_table(|table| {
            Ok(table
                .rows
                .iter()
                .rev()
                .take(limit as usize)
                .cloned()
                .collect())
        })
    }
}

/// Repositories behind trait objects so the backend can be swapped.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn SessionHistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            history: Arc::new(InMemoryRepository::new()),
        }
    }
}
