use super::super::scoring::SectionResult;
use super::aggregate::Recommendation;
use serde::Serialize;

const PSYCHOMETRIC_STRENGTH_MIN: u8 = 75;
const TECHNICAL_STRENGTH_MIN: u8 = 70;
const READINESS_STRENGTH_MIN: u8 = 80;

const TECHNICAL_GAP_BELOW: u8 = 60;
const PSYCHOMETRIC_GAP_BELOW: u8 = 65;
const READINESS_GAP_BELOW: u8 = 70;

/// Strength statements, each gated by its own battery threshold.
pub(crate) fn strengths(
    psychometric: &SectionResult,
    technical: &SectionResult,
    readiness: &SectionResult,
) -> Vec<&'static str> {
    let mut strengths = Vec::new();
    if psychometric.overall >= PSYCHOMETRIC_STRENGTH_MIN {
        strengths.push("Strong psychological fit for development work");
    }
    if technical.overall >= TECHNICAL_STRENGTH_MIN {
        strengths.push("Solid technical foundation");
    }
    if readiness.overall >= READINESS_STRENGTH_MIN {
        strengths.push("Excellent learning readiness");
    }
    strengths
}

pub(crate) fn gaps(
    psychometric: &SectionResult,
    technical: &SectionResult,
    readiness: &SectionResult,
) -> Vec<&'static str> {
    let mut gaps = Vec::new();
    if technical.overall < TECHNICAL_GAP_BELOW {
        gaps.push("Build stronger JavaScript fundamentals");
    }
    if psychometric.overall < PSYCHOMETRIC_GAP_BELOW {
        gaps.push("Develop persistence and growth mindset");
    }
    if readiness.overall < READINESS_GAP_BELOW {
        gaps.push("Clarify career goals and commitment level");
    }
    gaps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Ready to start the stack directly.
    FullStack,
    /// Foundations first.
    Foundations,
    /// Alternative pathways.
    Alternatives,
}

impl PathKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullStack => "Full-Stack Track",
            Self::Foundations => "Foundation Building",
            Self::Alternatives => "Alternative Pathways",
        }
    }

    pub const fn steps(self) -> &'static [&'static str] {
        match self {
            Self::FullStack => &[
                "Start with React.js fundamentals and JSX",
                "Learn Node.js and Express.js for backend",
                "Master MongoDB and database design",
                "Build 2-3 full-stack projects",
                "Deploy applications and create portfolio",
            ],
            Self::Foundations => &[
                "Strengthen JavaScript fundamentals first",
                "Practice with HTML/CSS projects",
                "Start with React basics when ready",
                "Consider structured bootcamp or course",
                "Build confidence with small projects",
            ],
            Self::Alternatives => &[
                "Explore no-code/low-code platforms first",
                "Consider UI/UX design pathway",
                "Try Python or other beginner-friendly languages",
                "Build general computer literacy",
                "Reassess technical interest in 6 months",
            ],
        }
    }
}

/// Static, ordered roadmap chosen by the overall recommendation tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningPath {
    pub kind: PathKind,
    pub label: &'static str,
    pub steps: Vec<&'static str>,
}

impl LearningPath {
    pub fn for_recommendation(recommendation: Recommendation) -> Self {
        let kind = match recommendation {
            Recommendation::Yes => PathKind::FullStack,
            Recommendation::Maybe => PathKind::Foundations,
            Recommendation::No => PathKind::Alternatives,
        };
        Self {
            kind,
            label: kind.label(),
            steps: kind.steps().to_vec(),
        }
    }
}
