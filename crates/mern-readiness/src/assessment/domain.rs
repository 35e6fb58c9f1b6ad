use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryKind {
    Psychometric,
    Technical,
    Readiness,
}

impl BatteryKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Psychometric, Self::Technical, Self::Readiness]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Psychometric => "psychometric",
            Self::Technical => "technical",
            Self::Readiness => "readiness",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Psychometric => "Psychometric Fit",
            Self::Technical => "Technical Readiness",
            Self::Readiness => "WISCAR Analysis",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "psychometric" => Some(Self::Psychometric),
            "technical" => Some(Self::Technical),
            "readiness" | "wiscar" => Some(Self::Readiness),
            _ => None,
        }
    }
}

/// The six WISCAR factors, in canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessFactor {
    Will,
    Interest,
    Skill,
    Cognitive,
    Ability,
    RealWorld,
}

impl ReadinessFactor {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Will,
            Self::Interest,
            Self::Skill,
            Self::Cognitive,
            Self::Ability,
            Self::RealWorld,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Will => "will",
            Self::Interest => "interest",
            Self::Skill => "skill",
            Self::Cognitive => "cognitive",
            Self::Ability => "ability",
            Self::RealWorld => "realworld",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Will => "Will (Persistence)",
            Self::Interest => "Interest (Engagement)",
            Self::Skill => "Skill (Technical Base)",
            Self::Cognitive => "Cognitive Readiness",
            Self::Ability => "Ability to Learn",
            Self::RealWorld => "Real-World Fit",
        }
    }
}

/// Broad answer shape presented to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    SingleChoice,
    BoundedScale,
    Slider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOption {
    pub label: &'static str,
    /// Trait weight on a 0..=100 scale.
    pub weight: u8,
}

/// Kind-specific parameters of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFormat {
    Likert {
        points: u8,
    },
    Slider {
        min: i64,
        max: i64,
        unit: &'static str,
    },
    Scenario {
        options: Vec<ScenarioOption>,
    },
    Quiz {
        options: Vec<&'static str>,
        correct: &'static str,
        explanation: &'static str,
    },
}

impl ResponseFormat {
    pub const fn answer_kind(&self) -> AnswerKind {
        match self {
            ResponseFormat::Likert { .. } => AnswerKind::BoundedScale,
            ResponseFormat::Slider { .. } => AnswerKind::Slider,
            ResponseFormat::Scenario { .. } | ResponseFormat::Quiz { .. } => {
                AnswerKind::SingleChoice
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionItem {
    pub id: &'static str,
    pub prompt: &'static str,
    pub format: ResponseFormat,
}

impl QuestionItem {
    pub fn validate(&self, value: &AnswerValue) -> Result<(), AnswerRejection> {
        match (&self.format, value) {
            (ResponseFormat::Likert { points }, AnswerValue::Number(number)) => {
                check_range(*number, 1, i64::from(*points))
            }
            (ResponseFormat::Slider { min, max, .. }, AnswerValue::Number(number)) => {
                check_range(*number, *min, *max)
            }
            (ResponseFormat::Scenario { options }, AnswerValue::Choice(choice)) => {
                if options.iter().any(|option| option.label == choice) {
                    Ok(())
                } else {
                    Err(AnswerRejection::UnknownOption)
                }
            }
            (ResponseFormat::Quiz { options, .. }, AnswerValue::Choice(choice)) => {
                if options.iter().any(|option| *option == choice) {
                    Ok(())
                } else {
                    Err(AnswerRejection::UnknownOption)
                }
            }
            (ResponseFormat::Likert { .. } | ResponseFormat::Slider { .. }, _) => {
                Err(AnswerRejection::KindMismatch { expected: "number" })
            }
            (ResponseFormat::Scenario { .. } | ResponseFormat::Quiz { .. }, _) => {
                Err(AnswerRejection::KindMismatch { expected: "option" })
            }
        }
    }
}

fn check_range(value: i64, min: i64, max: i64) -> Result<(), AnswerRejection> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AnswerRejection::OutOfRange { value, min, max })
    }
}

/// Raw respondent answer: a number for scales and sliders, an option label otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Choice(String),
}

impl AnswerValue {
    pub fn choice(label: impl Into<String>) -> Self {
        Self::Choice(label.into())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(number) => write!(f, "{number}"),
            AnswerValue::Choice(label) => write!(f, "{label}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AnswerRejection {
    #[error("value is not one of the listed options")]
    UnknownOption,
    #[error("value {value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("expected a {expected} answer")]
    KindMismatch { expected: &'static str },
    #[error("question is not part of this battery")]
    UnknownQuestion,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid answer for {question_id}: {rejection}")]
    InvalidAnswer {
        question_id: String,
        rejection: AnswerRejection,
    },
    #[error("out of sequence: {0}")]
    OutOfSequence(String),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl AssessmentError {
    pub(crate) fn invalid_answer(question_id: &str, rejection: AnswerRejection) -> Self {
        Self::InvalidAnswer {
            question_id: question_id.to_string(),
            rejection,
        }
    }
}
