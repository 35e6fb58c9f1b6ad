use super::super::answers::AnswerRecord;
use super::super::catalog::BatteryCatalog;
use super::super::domain::{AnswerValue, AssessmentError, ResponseFormat};
use super::rules::{answer_for, percentage};
use super::{ItemOutcome, SubScore};

/// Exact-match tally against each quiz item's canonical option.
pub(crate) fn score(
    catalog: &BatteryCatalog,
    answers: &AnswerRecord,
) -> Result<(Vec<SubScore>, u8, Vec<ItemOutcome>), AssessmentError> {
    let mut scores = Vec::new();
    let mut outcomes = Vec::new();
    let mut total_correct = 0;
    let mut total_questions = 0;

    for group in catalog.groups() {
        if group.items.is_empty() {
            return Err(AssessmentError::InvalidCatalog(format!(
                "group {} has no questions",
                group.key
            )));
        }

        let mut correct_in_group = 0;
        for item in &group.items {
            let ResponseFormat::Quiz {
                correct,
                explanation,
                ..
            } = &item.format
            else {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "{} is not a quiz question",
                    item.id
                )));
            };

            let selected = match answer_for(item, answers)? {
                AnswerValue::Choice(choice) => choice.clone(),
                other => other.to_string(),
            };
            let is_correct = selected == *correct;
            if is_correct {
                correct_in_group += 1;
            }

            outcomes.push(ItemOutcome {
                question_id: item.id,
                group_key: group.key,
                selected,
                correct_option: *correct,
                is_correct,
                explanation: *explanation,
            });
        }

        scores.push(SubScore {
            key: group.key,
            label: group.label,
            score: percentage(correct_in_group, group.items.len()),
        });
        total_correct += correct_in_group;
        total_questions += group.items.len();
    }

    Ok((scores, percentage(total_correct, total_questions), outcomes))
}
