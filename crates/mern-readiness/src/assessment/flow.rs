use super::catalog::{BatteryCatalog, QuestionView};
use super::domain::{AnswerValue, AssessmentError, BatteryKind, QuestionItem};
use super::navigator::{BatterySession, ProgressView};
use super::report::{aggregate, AssessmentReport};
use super::scoring::{ScoringEngine, SectionResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Intro,
    Psychometric,
    Technical,
    Readiness,
    Results,
}

impl FlowStage {
    pub const fn battery(self) -> Option<BatteryKind> {
        match self {
            Self::Psychometric => Some(BatteryKind::Psychometric),
            Self::Technical => Some(BatteryKind::Technical),
            Self::Readiness => Some(BatteryKind::Readiness),
            Self::Intro | Self::Results => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Intro => "Introduction",
            Self::Psychometric => "Psychometric Assessment",
            Self::Technical => "Technical Assessment",
            Self::Readiness => "WISCAR Framework",
            Self::Results => "Results",
        }
    }

    const fn for_battery(battery: BatteryKind) -> Self {
        match battery {
            BatteryKind::Psychometric => Self::Psychometric,
            BatteryKind::Technical => Self::Technical,
            BatteryKind::Readiness => Self::Readiness,
        }
    }
}

/// The three battery catalogs a flow walks through, shared across sessions.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    psychometric: Arc<BatteryCatalog>,
    technical: Arc<BatteryCatalog>,
    readiness: Arc<BatteryCatalog>,
}

impl CatalogSet {
    pub fn new(
        psychometric: BatteryCatalog,
        technical: BatteryCatalog,
        readiness: BatteryCatalog,
    ) -> Result<Self, AssessmentError> {
        for (catalog, expected) in [
            (&psychometric, BatteryKind::Psychometric),
            (&technical, BatteryKind::Technical),
            (&readiness, BatteryKind::Readiness),
        ] {
            if catalog.battery() != expected {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "{} catalog supplied for the {} battery",
                    catalog.battery().key(),
                    expected.key()
                )));
            }
        }

        Ok(Self {
            psychometric: Arc::new(psychometric),
            technical: Arc::new(technical),
            readiness: Arc::new(readiness),
        })
    }

    pub fn standard() -> Result<Self, AssessmentError> {
        Self::new(
            BatteryCatalog::standard(BatteryKind::Psychometric)?,
            BatteryCatalog::standard(BatteryKind::Technical)?,
            BatteryCatalog::standard(BatteryKind::Readiness)?,
        )
    }

    pub fn get(&self, battery: BatteryKind) -> &Arc<BatteryCatalog> {
        match battery {
            BatteryKind::Psychometric => &self.psychometric,
            BatteryKind::Technical => &self.technical,
            BatteryKind::Readiness => &self.readiness,
        }
    }
}

/// Host flow driving one respondent through every battery and into the report.
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    catalogs: CatalogSet,
    stage: FlowStage,
    active: Option<BatterySession>,
    completed: Vec<SectionResult>,
    report: Option<AssessmentReport>,
}

impl AssessmentFlow {
    pub fn new(catalogs: CatalogSet) -> Self {
        Self {
            catalogs,
            stage: FlowStage::Intro,
            active: None,
            completed: Vec::new(),
            report: None,
        }
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Leaves the introduction and opens the first battery.
    pub fn begin(&mut self) -> Result<FlowStage, AssessmentError> {
        if self.stage != FlowStage::Intro {
            return Err(AssessmentError::OutOfSequence(format!(
                "assessment already started ({})",
                self.stage.label()
            )));
        }
        self.open_battery(BatteryKind::Psychometric);
        Ok(self.stage)
    }

    fn open_battery(&mut self, battery: BatteryKind) {
        let catalog = Arc::clone(self.catalogs.get(battery));
        self.active = Some(BatterySession::new(catalog));
        self.stage = FlowStage::for_battery(battery);
    }

    fn active_session(&self) -> Result<&BatterySession, AssessmentError> {
        self.active.as_ref().ok_or_else(|| {
            AssessmentError::OutOfSequence(format!(
                "no battery is open during {}",
                self.stage.label()
            ))
        })
    }

    pub fn current_item(&self) -> Result<&QuestionItem, AssessmentError> {
        self.active_session()?.current_item()
    }

    pub fn current_view(&self) -> Result<QuestionView, AssessmentError> {
        self.active_session()?.current_view()
    }

    pub fn progress(&self) -> Option<ProgressView> {
        self.active.as_ref().map(BatterySession::progress)
    }

    /// Answers the current question. Finishing a battery scores it and opens
    /// the next one; finishing the last battery produces the report.
    pub fn submit_answer(&mut self, value: AnswerValue) -> Result<FlowStage, AssessmentError> {
        let session = self.active.as_mut().ok_or_else(|| {
            AssessmentError::OutOfSequence(format!(
                "cannot answer during {}",
                self.stage.label()
            ))
        })?;
        session.submit_answer(value)?;

        if session.is_complete() {
            self.complete_active_battery()?;
        }
        Ok(self.stage)
    }

    fn complete_active_battery(&mut self) -> Result<(), AssessmentError> {
        let session = self.active.take().ok_or_else(|| {
            AssessmentError::OutOfSequence("no battery to complete".to_string())
        })?;
        let battery = session.battery();
        let engine = ScoringEngine::new(Arc::clone(session.catalog()));
        let answers = session.into_answers()?;
        let result = engine.score(&answers)?;
        info!(
            battery = battery.key(),
            overall = result.overall,
            "battery completed"
        );
        self.completed.push(result);

        match battery {
            BatteryKind::Psychometric => self.open_battery(BatteryKind::Technical),
            BatteryKind::Technical => self.open_battery(BatteryKind::Readiness),
            BatteryKind::Readiness => self.finish()?,
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), AssessmentError> {
        let psychometric = self.take_result(BatteryKind::Psychometric)?;
        let technical = self.take_result(BatteryKind::Technical)?;
        let readiness = self.take_result(BatteryKind::Readiness)?;
        self.report = Some(aggregate(psychometric, technical, readiness)?);
        self.stage = FlowStage::Results;
        Ok(())
    }

    fn take_result(&self, battery: BatteryKind) -> Result<SectionResult, AssessmentError> {
        self.completed
            .iter()
            .find(|result| result.battery == battery)
            .cloned()
            .ok_or_else(|| {
                AssessmentError::OutOfSequence(format!("{} battery has no result", battery.key()))
            })
    }

    pub fn completed_sections(&self) -> &[SectionResult] {
        &self.completed
    }

    pub fn report(&self) -> Result<&AssessmentReport, AssessmentError> {
        self.report.as_ref().ok_or_else(|| {
            AssessmentError::OutOfSequence(format!(
                "report is not ready during {}",
                self.stage.label()
            ))
        })
    }

    /// Discards all progress and returns to the introduction.
    pub fn restart(&mut self) {
        self.stage = FlowStage::Intro;
        self.active = None;
        self.completed.clear();
        self.report = None;
    }
}
