mod psychometric;
mod readiness;
mod rules;
mod technical;

use super::answers::AnswerRecord;
use super::catalog::BatteryCatalog;
use super::domain::{AssessmentError, BatteryKind};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Stateless scorer bound to one battery's catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<BatteryCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<BatteryCatalog>) -> Self {
        Self { catalog }
    }

    pub fn score(&self, answers: &AnswerRecord) -> Result<SectionResult, AssessmentError> {
        let (scores, overall, item_outcomes) = match self.catalog.battery() {
            BatteryKind::Psychometric => {
                let (scores, overall) = psychometric::score(&self.catalog, answers)?;
                (scores, overall, Vec::new())
            }
            BatteryKind::Technical => technical::score(&self.catalog, answers)?,
            BatteryKind::Readiness => {
                let (scores, overall) = readiness::score(&self.catalog, answers)?;
                (scores, overall, Vec::new())
            }
        };

        info!(
            battery = self.catalog.battery().key(),
            overall, "battery scored"
        );

        Ok(SectionResult {
            battery: self.catalog.battery(),
            answers: answers.clone(),
            scores,
            overall,
            item_outcomes,
        })
    }
}

/// Score for one named group within a battery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubScore {
    pub key: &'static str,
    pub label: &'static str,
    pub score: u8,
}

/// Per-question comparison against the answer key (technical battery only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub question_id: &'static str,
    pub group_key: &'static str,
    pub selected: String,
    pub correct_option: &'static str,
    pub is_correct: bool,
    pub explanation: &'static str,
}

/// Immutable scoring result for a completed battery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResult {
    pub battery: BatteryKind,
    pub answers: AnswerRecord,
    pub scores: Vec<SubScore>,
    pub overall: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub item_outcomes: Vec<ItemOutcome>,
}

impl SectionResult {
    pub fn sub_score(&self, key: &str) -> Option<u8> {
        self.scores
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.score)
    }
}

/// Qualitative tier used when rendering any 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Developing,
    NeedsWork,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 75 {
            Self::Strong
        } else if score >= 60 {
            Self::Developing
        } else {
            Self::NeedsWork
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Developing => "Developing",
            Self::NeedsWork => "Needs Work",
        }
    }
}
