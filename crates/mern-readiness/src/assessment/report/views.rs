use super::super::domain::BatteryKind;
use super::super::scoring::ScoreBand;
use super::aggregate::Recommendation;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SubScoreEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub score: u8,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatterySummaryEntry {
    pub battery: BatteryKind,
    pub battery_label: &'static str,
    pub overall: u8,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub sub_scores: Vec<SubScoreEntry>,
}

/// Flattened, display-ready rendering of an assessment report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub overall: u8,
    pub recommendation: Recommendation,
    pub recommendation_label: &'static str,
    pub headline: &'static str,
    pub batteries: Vec<BatterySummaryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<&'static str>,
    pub learning_path: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missed_questions: Vec<&'static str>,
}
