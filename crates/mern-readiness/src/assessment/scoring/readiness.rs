use super::super::answers::AnswerRecord;
use super::super::catalog::BatteryCatalog;
use super::super::domain::{AssessmentError, ReadinessFactor};
use super::rules::{group_score, mean_score};
use super::SubScore;

/// Scores the six WISCAR factors in canonical order; overall is their unweighted mean.
pub(crate) fn score(
    catalog: &BatteryCatalog,
    answers: &AnswerRecord,
) -> Result<(Vec<SubScore>, u8), AssessmentError> {
    let mut scores = Vec::with_capacity(ReadinessFactor::ordered().len());

    for factor in ReadinessFactor::ordered() {
        let group = catalog
            .groups()
            .iter()
            .find(|group| group.key == factor.key())
            .ok_or_else(|| {
                AssessmentError::InvalidCatalog(format!(
                    "readiness catalog lacks the {} factor",
                    factor.key()
                ))
            })?;

        let mut entry = group_score(group, answers)?;
        entry.label = factor.label();
        scores.push(entry);
    }

    let values: Vec<u8> = scores.iter().map(|entry| entry.score).collect();
    Ok((scores, mean_score(&values)))
}
