use super::super::answers::AnswerRecord;
use super::super::catalog::BatteryCatalog;
use super::super::domain::AssessmentError;
use super::rules::group_mean_scores;
use super::SubScore;

/// Interest, personality, and grit groups each average their normalized items.
pub(crate) fn score(
    catalog: &BatteryCatalog,
    answers: &AnswerRecord,
) -> Result<(Vec<SubScore>, u8), AssessmentError> {
    group_mean_scores(catalog, answers)
}
