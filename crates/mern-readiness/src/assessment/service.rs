use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::catalog::QuestionView;
use super::domain::{AnswerValue, AssessmentError, BatteryKind};
use super::flow::{AssessmentFlow, CatalogSet, FlowStage};
use super::navigator::ProgressView;
use super::report::AssessmentReport;
use super::store::{SessionId, SessionRecord, SessionStore, StoreError};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("asm-{id:06}"))
}

/// Service composing the catalogs, the session store, and the assessment flow.
pub struct AssessmentService<S> {
    catalogs: CatalogSet,
    store: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, catalogs: CatalogSet) -> Self {
        Self { catalogs, store }
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Opens a new session positioned on the first psychometric question.
    pub fn start(&self) -> Result<SessionView, SessionServiceError> {
        let mut flow = AssessmentFlow::new(self.catalogs.clone());
        flow.begin()?;

        let record = SessionRecord {
            id: next_session_id(),
            flow,
            started_at: Utc::now(),
            completed_at: None,
        };
        let stored = self.store.insert(record)?;
        info!(session = %stored.id, "assessment session started");
        Ok(SessionView::from_record(&stored))
    }

    pub fn state(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let record = self.fetch(id)?;
        Ok(SessionView::from_record(&record))
    }

    /// Applies one answer. A rejected answer leaves the stored session untouched.
    pub fn answer(
        &self,
        id: &SessionId,
        value: AnswerValue,
    ) -> Result<SessionView, SessionServiceError> {
        let view = self.store.modify(id, |record| {
            let mut next = record.clone();
            let stage = next.flow.submit_answer(value)?;

            if stage == FlowStage::Results && next.completed_at.is_none() {
                next.completed_at = Some(Utc::now());
                info!(session = %next.id, "assessment session completed");
            }

            *record = next;
            Ok::<_, AssessmentError>(SessionView::from_record(record))
        })??;
        Ok(view)
    }

    pub fn report(&self, id: &SessionId) -> Result<AssessmentReport, SessionServiceError> {
        let record = self.fetch(id)?;
        let report = record.flow.report()?.clone();
        Ok(report)
    }

    /// Discards progress and reopens the first battery.
    pub fn restart(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let view = self.store.modify(id, |record| {
            let mut flow = record.flow.clone();
            flow.restart();
            flow.begin()?;

            record.flow = flow;
            record.started_at = Utc::now();
            record.completed_at = None;
            Ok::<_, AssessmentError>(SessionView::from_record(record))
        })??;
        Ok(view)
    }

    /// Abandons a session, dropping its answers and freeing its slot.
    pub fn discard(&self, id: &SessionId) -> Result<(), SessionServiceError> {
        self.store.remove(id)?;
        info!(session = %id, "assessment session discarded");
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

/// Public rendering of a session's position in the assessment.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub stage: FlowStage,
    pub stage_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionView>,
    pub completed_batteries: Vec<BatteryKind>,
    pub started_at: chrono::DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<chrono::DateTime<Utc>>,
}

impl SessionView {
    pub fn from_record(record: &SessionRecord) -> Self {
        let flow = &record.flow;
        Self {
            session_id: record.id.clone(),
            stage: flow.stage(),
            stage_label: flow.stage().label(),
            progress: flow.progress(),
            current_question: flow.current_view().ok(),
            completed_batteries: flow
                .completed_sections()
                .iter()
                .map(|section| section.battery)
                .collect(),
            started_at: record.started_at,
            completed_at: record.completed_at,
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
