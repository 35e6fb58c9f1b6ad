use metrics_exporter_prometheus::PrometheusHandle;
use mern_readiness::assessment::{BatteryKind, SessionId, SessionRecord, SessionStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store holding at most `capacity` sessions. A full
/// store makes room by evicting the session that finished earliest.
#[derive(Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    capacity: usize,
}

impl InMemorySessionStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        if guard.len() >= self.capacity {
            let finished = guard
                .values()
                .filter_map(|stored| stored.completed_at.map(|at| (at, stored.id.clone())))
                .min_by_key(|(at, _)| *at);
            let Some((completed_at, evicted)) = finished else {
                return Err(StoreError::CapacityExceeded(self.capacity));
            };
            guard.remove(&evicted);
            debug!(session = %evicted, %completed_at, "evicted finished session");
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        Ok(change(record))
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

pub(crate) fn parse_battery(raw: &str) -> Result<BatteryKind, String> {
    BatteryKind::from_key(raw).ok_or_else(|| {
        format!("unknown battery '{raw}' (expected psychometric, technical, or readiness)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mern_readiness::assessment::{AssessmentFlow, CatalogSet};

    fn record(id: &str) -> SessionRecord {
        SessionRecord {
            id: SessionId(id.to_string()),
            flow: AssessmentFlow::new(CatalogSet::standard().expect("standard catalogs")),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn store_enforces_capacity() {
        let store = InMemorySessionStore::with_capacity(1);
        store.insert(record("asm-1")).expect("first insert");

        assert!(matches!(
            store.insert(record("asm-2")),
            Err(StoreError::CapacityExceeded(1))
        ));

        store
            .remove(&SessionId("asm-1".to_string()))
            .expect("remove succeeds");
        store.insert(record("asm-2")).expect("slot freed");
    }

    #[test]
    fn full_store_evicts_earliest_finished_session() {
        let store = InMemorySessionStore::with_capacity(2);
        let mut early = record("asm-1");
        early.completed_at = Some(Utc::now() - Duration::minutes(5));
        let mut late = record("asm-2");
        late.completed_at = Some(Utc::now());
        store.insert(early).expect("first insert");
        store.insert(late).expect("second insert");

        store.insert(record("asm-3")).expect("evicts a finished session");

        assert!(store.fetch(&SessionId("asm-1".to_string())).expect("fetch").is_none());
        assert!(store.fetch(&SessionId("asm-2".to_string())).expect("fetch").is_some());
        store.insert(record("asm-4")).expect("evicts the remaining finished session");
        assert!(matches!(
            store.insert(record("asm-5")),
            Err(StoreError::CapacityExceeded(2))
        ));
    }

    #[test]
    fn modify_requires_existing_session() {
        let store = InMemorySessionStore::with_capacity(4);
        let id = SessionId("asm-9".to_string());

        assert!(matches!(store.modify(&id, |_| ()), Err(StoreError::NotFound)));
        store.insert(record("asm-9")).expect("insert");
        assert!(matches!(
            store.insert(record("asm-9")),
            Err(StoreError::Conflict)
        ));

        let finished = Utc::now();
        store
            .modify(&id, |stored| stored.completed_at = Some(finished))
            .expect("modify succeeds");
        let stored = store.fetch(&id).expect("fetch").expect("present");
        assert_eq!(stored.completed_at, Some(finished));
    }

    #[test]
    fn battery_names_parse_case_insensitively() {
        assert_eq!(parse_battery("Technical"), Ok(BatteryKind::Technical));
        assert_eq!(parse_battery("wiscar"), Ok(BatteryKind::Readiness));
        assert!(parse_battery("aptitude").is_err());
    }
}
