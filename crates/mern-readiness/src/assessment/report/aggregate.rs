use super::super::domain::{AssessmentError, BatteryKind};
use super::super::scoring::{ScoreBand, SectionResult};
use super::feedback::{self, LearningPath};
use super::views::{BatterySummaryEntry, ReportSummary, SubScoreEntry};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "MAYBE")]
    Maybe,
    #[serde(rename = "NO")]
    No,
}

impl Recommendation {
    /// Lower bounds are inclusive: 75 is YES, 55 is MAYBE.
    pub const fn from_score(overall: u8) -> Self {
        if overall >= 75 {
            Self::Yes
        } else if overall >= 55 {
            Self::Maybe
        } else {
            Self::No
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::Maybe => "MAYBE",
            Self::No => "NO",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::Yes => "You Should Learn MERN!",
            Self::Maybe => "MERN Could Work for You",
            Self::No => "Consider Alternative Paths",
        }
    }
}

/// Final report combining the three battery results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentReport {
    pub psychometric: SectionResult,
    pub technical: SectionResult,
    pub readiness: SectionResult,
    pub overall: u8,
    pub recommendation: Recommendation,
    pub strengths: Vec<&'static str>,
    pub gaps: Vec<&'static str>,
    pub learning_path: LearningPath,
}

/// Folds the three battery results into the final report. Each result must
/// sit in the slot of its own battery.
pub fn aggregate(
    psychometric: SectionResult,
    technical: SectionResult,
    readiness: SectionResult,
) -> Result<AssessmentReport, AssessmentError> {
    expect_battery(&psychometric, BatteryKind::Psychometric)?;
    expect_battery(&technical, BatteryKind::Technical)?;
    expect_battery(&readiness, BatteryKind::Readiness)?;

    let combined = (u32::from(psychometric.overall)
        + u32::from(technical.overall)
        + u32::from(readiness.overall)) as f64
        / 3.0;
    let overall = combined.round().clamp(0.0, 100.0) as u8;
    let recommendation = Recommendation::from_score(overall);

    let strengths = feedback::strengths(&psychometric, &technical, &readiness);
    let gaps = feedback::gaps(&psychometric, &technical, &readiness);
    let learning_path = LearningPath::for_recommendation(recommendation);

    info!(
        overall,
        recommendation = recommendation.label(),
        "assessment report generated"
    );

    Ok(AssessmentReport {
        psychometric,
        technical,
        readiness,
        overall,
        recommendation,
        strengths,
        gaps,
        learning_path,
    })
}

fn expect_battery(result: &SectionResult, expected: BatteryKind) -> Result<(), AssessmentError> {
    if result.battery == expected {
        Ok(())
    } else {
        Err(AssessmentError::OutOfSequence(format!(
            "expected a {} result, received {}",
            expected.key(),
            result.battery.key()
        )))
    }
}

impl AssessmentReport {
    pub fn sections(&self) -> [&SectionResult; 3] {
        [&self.psychometric, &self.technical, &self.readiness]
    }

    pub fn summary(&self) -> ReportSummary {
        let batteries = self
            .sections()
            .into_iter()
            .map(|section| BatterySummaryEntry {
                battery: section.battery,
                battery_label: section.battery.label(),
                overall: section.overall,
                band: ScoreBand::from_score(section.overall),
                band_label: ScoreBand::from_score(section.overall).label(),
                sub_scores: section
                    .scores
                    .iter()
                    .map(|entry| SubScoreEntry {
                        key: entry.key,
                        label: entry.label,
                        score: entry.score,
                        band: ScoreBand::from_score(entry.score),
                    })
                    .collect(),
            })
            .collect();

        let missed_questions = self
            .technical
            .item_outcomes
            .iter()
            .filter(|outcome| !outcome.is_correct)
            .map(|outcome| outcome.question_id)
            .collect();

        ReportSummary {
            overall: self.overall,
            recommendation: self.recommendation,
            recommendation_label: self.recommendation.label(),
            headline: self.recommendation.headline(),
            batteries,
            strengths: self.strengths.clone(),
            gaps: self.gaps.clone(),
            learning_path: self.learning_path.steps.clone(),
            missed_questions,
        }
    }
}
