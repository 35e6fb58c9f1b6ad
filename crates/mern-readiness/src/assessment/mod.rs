//! MERN stack readiness assessment: question catalogs, answer navigation,
//! per-battery scoring, and the combined report.

pub mod answers;
pub mod catalog;
pub mod domain;
pub mod flow;
pub mod import;
pub mod navigator;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use answers::AnswerRecord;
pub use catalog::{BatteryCatalog, CatalogView, QuestionGroup, QuestionView};
pub use domain::{
    AnswerKind, AnswerRejection, AnswerValue, AssessmentError, BatteryKind, QuestionItem,
    ReadinessFactor, ResponseFormat, ScenarioOption,
};
pub use flow::{AssessmentFlow, CatalogSet, FlowStage};
pub use import::{AnswerImportError, AnswerSheetImporter};
pub use navigator::{BatterySession, ProgressView};
pub use report::{aggregate, AssessmentReport, LearningPath, PathKind, Recommendation};
pub use router::assessment_router;
pub use scoring::{ItemOutcome, ScoreBand, ScoringEngine, SectionResult, SubScore};
pub use service::{AssessmentService, SessionServiceError, SessionView};
pub use store::{SessionId, SessionRecord, SessionStore, StoreError};
