use super::flow::AssessmentFlow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for respondent sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store record holding a respondent's in-progress or finished flow.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub flow: AssessmentFlow,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError>;
    /// Applies `change` to the stored record while holding the store's lock.
    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SessionRecord) -> T;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
    fn remove(&self, id: &SessionId) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session capacity of {0} reached")]
    CapacityExceeded(usize),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
