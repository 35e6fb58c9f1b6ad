use super::super::answers::AnswerRecord;
use super::super::catalog::{BatteryCatalog, QuestionGroup};
use super::super::domain::{AnswerValue, AssessmentError, QuestionItem, ResponseFormat};
use super::SubScore;

/// Rounds half away from zero and clamps into the reported score range.
pub(crate) fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

pub(crate) fn percentage(numerator: usize, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    round_score(numerator as f64 * 100.0 / denominator as f64)
}

pub(crate) fn mean_score(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: f64 = scores.iter().map(|score| f64::from(*score)).sum();
    round_score(total / scores.len() as f64)
}

/// Looks up a question's answer, rejecting missing or malformed values.
pub(crate) fn answer_for<'a>(
    item: &QuestionItem,
    answers: &'a AnswerRecord,
) -> Result<&'a AnswerValue, AssessmentError> {
    let value = answers.get(item.id).ok_or_else(|| {
        AssessmentError::OutOfSequence(format!("no answer recorded for {}", item.id))
    })?;
    item.validate(value)
        .map_err(|rejection| AssessmentError::invalid_answer(item.id, rejection))?;
    Ok(value)
}

/// Normalizes a single validated answer onto 0..=100.
pub(crate) fn normalized_item_score(
    item: &QuestionItem,
    value: &AnswerValue,
) -> Result<f64, AssessmentError> {
    match (&item.format, value) {
        (ResponseFormat::Likert { points }, AnswerValue::Number(number)) => {
            Ok(linear(*number, 1, i64::from(*points)))
        }
        (ResponseFormat::Slider { min, max, .. }, AnswerValue::Number(number)) => {
            Ok(linear(*number, *min, *max))
        }
        (ResponseFormat::Scenario { options }, AnswerValue::Choice(choice)) => options
            .iter()
            .find(|option| option.label == choice)
            .map(|option| f64::from(option.weight))
            .ok_or_else(|| {
                AssessmentError::InvalidCatalog(format!("{} has no weight for '{choice}'", item.id))
            }),
        (ResponseFormat::Quiz { correct, .. }, AnswerValue::Choice(choice)) => {
            Ok(if choice == correct { 100.0 } else { 0.0 })
        }
        _ => Err(AssessmentError::InvalidCatalog(format!(
            "{} cannot normalize answer '{value}'",
            item.id
        ))),
    }
}

fn linear(value: i64, min: i64, max: i64) -> f64 {
    let span = max as f64 - min as f64;
    if span <= 0.0 {
        return 0.0;
    }
    ((value as f64 - min as f64) / span * 100.0).clamp(0.0, 100.0)
}

pub(crate) fn group_score(
    group: &QuestionGroup,
    answers: &AnswerRecord,
) -> Result<SubScore, AssessmentError> {
    if group.items.is_empty() {
        return Err(AssessmentError::InvalidCatalog(format!(
            "group {} has no questions",
            group.key
        )));
    }

    let mut total = 0.0;
    for item in &group.items {
        let value = answer_for(item, answers)?;
        total += normalized_item_score(item, value)?;
    }

    Ok(SubScore {
        key: group.key,
        label: group.label,
        score: round_score(total / group.items.len() as f64),
    })
}

/// Scores each group by averaging normalized items; overall is the mean of
/// the rounded group scores.
pub(crate) fn group_mean_scores(
    catalog: &BatteryCatalog,
    answers: &AnswerRecord,
) -> Result<(Vec<SubScore>, u8), AssessmentError> {
    let scores = catalog
        .groups()
        .iter()
        .map(|group| group_score(group, answers))
        .collect::<Result<Vec<_>, _>>()?;

    let values: Vec<u8> = scores.iter().map(|entry| entry.score).collect();
    let overall = mean_score(&values);
    Ok((scores, overall))
}
